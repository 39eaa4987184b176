use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use schedule_ingest::runtime::callbacks::{
    post_import_complete, post_import_error, HttpScheduleSink,
};
use schedule_ingest::runtime::fetcher::HttpFetcher;
use schedule_ingest::runtime::logging::{CallbackLogger, Logger};
use schedule_ingest::error::ImportError;
use schedule_ingest::runtime::orchestrator::{normalize_request_blocking, run_import};
use schedule_ingest::runtime::types::ImportContext;
use schedule_ingest::sources::configs::SourcesConfig;
use schedule_ingest::types::{ImportConfig, NormalizeRequest};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

struct AppState {
    sources: Arc<SourcesConfig>,
    client: reqwest::Client,
    active_jobs: AtomicUsize,
}

async fn handle_import(
    State(state): State<Arc<AppState>>,
    Json(config): Json<ImportConfig>,
) -> (StatusCode, Json<serde_json::Value>) {
    let callback_base = config.callback_base.clone();
    let callback_token = config.callback_token.clone();

    state.active_jobs.fetch_add(1, Ordering::SeqCst);
    let state_for_task = state.clone();

    let handle = tokio::spawn(async move {
        let client = state_for_task.client.clone();
        let encoding = state_for_task
            .sources
            .get(&config.institution)
            .and_then(|institution| institution.encoding.as_deref());
        let logger: Arc<dyn Logger> = Arc::new(CallbackLogger::new(
            client.clone(),
            &config.callback_base,
            &config.callback_token,
        ));
        let ctx = ImportContext {
            fetcher: Arc::new(HttpFetcher::new(client.clone()).with_encoding(encoding)),
            sink: Arc::new(HttpScheduleSink::new(
                client.clone(),
                &config.callback_base,
                &config.callback_token,
            )),
            logger,
        };

        match run_import(&ctx, &config, &state_for_task.sources).await {
            Ok(report) => {
                tracing::info!(
                    "[Import] {} courses imported ({} rejected)",
                    report.courses,
                    report.rejected
                );
                if let Err(err) = post_import_complete(
                    &client,
                    &config.callback_base,
                    &config.callback_token,
                    report.courses,
                )
                .await
                {
                    tracing::error!("[Import] Failed to report completion: {}", err);
                }
            }
            Err(err) => {
                tracing::error!("[Import] Import failed: {}", err);
                post_import_error(
                    &client,
                    &config.callback_base,
                    &config.callback_token,
                    &err.to_string(),
                )
                .await;
            }
        }
    });

    let state_for_monitor = state.clone();
    tokio::spawn(async move {
        if let Err(err) = handle.await {
            tracing::error!("[Import] Import task panicked or was cancelled: {}", err);
            post_import_error(
                &state_for_monitor.client,
                &callback_base,
                &callback_token,
                &err.to_string(),
            )
            .await;
        }
        state_for_monitor.active_jobs.fetch_sub(1, Ordering::SeqCst);
    });

    (StatusCode::OK, Json(json!({ "status": "accepted" })))
}

async fn handle_normalize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NormalizeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    match normalize_request_blocking(state.sources.clone(), request).await {
        Ok(payload) => match serde_json::to_value(&payload) {
            Ok(value) => (StatusCode::OK, Json(value)),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ),
        },
        Err(err @ ImportError::Interrupted(_)) => {
            tracing::error!("[Import] {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
        }
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        ),
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let sources = SourcesConfig::load_default().expect("Failed to load sources.json");
    tracing::info!("[Import] Loaded {} institutions", sources.institutions.len());

    let state = Arc::new(AppState {
        sources: Arc::new(sources),
        client: reqwest::Client::new(),
        active_jobs: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/import", post(handle_import))
        .route("/normalize", post(handle_normalize))
        .fallback(handle_health)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("Failed to bind to port 8080");

    tracing::info!("[Import] Listening on :8080");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("Server failed");
}

async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("[Import] Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!(
        "[Import] Shutting down with {} active jobs",
        state.active_jobs.load(Ordering::SeqCst)
    );
}
