use crate::runtime::types::ScheduleSink;
use crate::types::{CourseRecord, SemesterConfig, TimeSlot};
use async_trait::async_trait;
use reqwest::Client;

pub async fn callback_fetch(
    client: &Client,
    callback_base: &str,
    callback_token: &str,
    path: &str,
    method: reqwest::Method,
    body: Option<serde_json::Value>,
) -> Result<reqwest::Response, String> {
    let url = format!("{callback_base}{path}");
    let mut builder = client
        .request(method, &url)
        .header("Authorization", format!("Bearer {callback_token}"));

    if let Some(json_body) = body {
        builder = builder.json(&json_body);
    }

    builder
        .send()
        .await
        .map_err(|e| format!("Request to {url} failed: {e}"))
}

async fn post_checked(
    client: &Client,
    callback_base: &str,
    callback_token: &str,
    path: &str,
    body: serde_json::Value,
    label: &str,
) -> Result<(), String> {
    let res = callback_fetch(
        client,
        callback_base,
        callback_token,
        path,
        reqwest::Method::POST,
        Some(body),
    )
    .await?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        return Err(format!("{label} callback failed: {status} {text}"));
    }

    Ok(())
}

pub(crate) async fn post_debug_log(
    client: &Client,
    callback_base: &str,
    callback_token: &str,
    level: &str,
    message: &str,
    context: Option<serde_json::Value>,
) {
    let body = serde_json::json!({
        "level": level,
        "message": message,
        "context": context,
    });

    let result = callback_fetch(
        client,
        callback_base,
        callback_token,
        "/api/callback/importLog",
        reqwest::Method::POST,
        Some(body),
    )
    .await;
    if let Err(err) = result {
        eprintln!(
            "[Import][stderr] post_debug_log failed: level={} message={} err={}",
            level, message, err
        );
    }
}

pub async fn post_import_error(
    client: &Client,
    callback_base: &str,
    callback_token: &str,
    error: &str,
) {
    let result = post_checked(
        client,
        callback_base,
        callback_token,
        "/api/callback/importError",
        serde_json::json!({ "error": error }),
        "Import error",
    )
    .await;
    if let Err(err) = result {
        tracing::error!("[Import] Failed to report import error: {}", err);
    }
}

pub async fn post_import_complete(
    client: &Client,
    callback_base: &str,
    callback_token: &str,
    courses: usize,
) -> Result<(), String> {
    post_checked(
        client,
        callback_base,
        callback_token,
        "/api/callback/importComplete",
        serde_json::json!({ "courses": courses }),
        "Import complete",
    )
    .await
}

/// Persists payloads by posting them to the host application's callback API.
pub struct HttpScheduleSink {
    client: Client,
    callback_base: String,
    callback_token: String,
}

impl HttpScheduleSink {
    pub fn new(client: Client, callback_base: &str, callback_token: &str) -> Self {
        Self {
            client,
            callback_base: callback_base.to_string(),
            callback_token: callback_token.to_string(),
        }
    }
}

#[async_trait]
impl ScheduleSink for HttpScheduleSink {
    async fn save_courses(&self, courses: &[CourseRecord]) -> Result<(), String> {
        post_checked(
            &self.client,
            &self.callback_base,
            &self.callback_token,
            "/api/callback/saveImportedCourses",
            serde_json::json!({ "courses": courses }),
            "Save courses",
        )
        .await
    }

    async fn save_time_slots(&self, time_slots: &[TimeSlot]) -> Result<(), String> {
        post_checked(
            &self.client,
            &self.callback_base,
            &self.callback_token,
            "/api/callback/savePresetTimeSlots",
            serde_json::json!({ "timeSlots": time_slots }),
            "Save time slots",
        )
        .await
    }

    async fn save_config(&self, config: &SemesterConfig) -> Result<(), String> {
        post_checked(
            &self.client,
            &self.callback_base,
            &self.callback_token,
            "/api/callback/saveCourseConfig",
            serde_json::json!({ "config": config }),
            "Save config",
        )
        .await
    }
}
