use schedule_ingest::runtime::logging::{Logger, TracingLogger};
use schedule_ingest::runtime::orchestrator::normalize_request;
use schedule_ingest::sources::configs::SourcesConfig;
use schedule_ingest::types::NormalizeRequest;
use schedule_ingest::{error, info};

struct Cli {
    logger: TracingLogger,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli {
        logger: TracingLogger,
    };

    let mut args = std::env::args().skip(1);
    let (Some(institution), Some(path)) = (args.next(), args.next()) else {
        eprintln!("Usage: normalize <institution> <document_file> [campus]");
        std::process::exit(2);
    };
    let campus = args.next().and_then(|value| value.parse::<usize>().ok());

    let document = std::fs::read_to_string(&path).expect("Failed to read document");
    let sources = SourcesConfig::load_default().expect("Failed to load sources.json");

    let request = NormalizeRequest {
        institution,
        document,
        campus,
    };
    match normalize_request(&sources, &request) {
        Ok(payload) => {
            info!(cli, "{}: {} courses", path, payload.courses.len());
            let json = serde_json::to_string_pretty(&payload).expect("Failed to serialize payload");
            println!("{json}");
        }
        Err(err) => {
            error!(cli, "{}: {}", path, err);
            std::process::exit(1);
        }
    }
}
