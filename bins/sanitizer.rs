use std::sync::Arc;

use common::utils::logging::init_logging_json;
use dotenvy::dotenv;
use service::policy;
use service::report::TracingSink;
use service::sanitizer::Sanitizer;
use service::storage::json_pref_store::JsonPrefStore;
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG can come from it
    dotenv().ok();
    init_logging_json();
    info!(service = "sanitizer", event = "logger_init", "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "sanitizer",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    info!(
        service = "sanitizer",
        event = "start",
        %service_id,
        pid,
        version,
        "startup store sanitizer running"
    );

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config unavailable; falling back to defaults and env");
            let mut cfg = configs::AppConfig::default();
            if let Ok(path) = std::env::var("STORE_PATH") {
                cfg.store.path = path;
            }
            cfg
        }
    };

    // Whatever happens in here, host startup continues: the sanitizer's
    // failure modes are reported, never fatal.
    match run_sanitizer(&cfg).await {
        Ok(outcome) => info!(
            service = "sanitizer",
            event = "done",
            action = ?outcome.action_taken,
            "startup store sanitation finished"
        ),
        Err(e) => warn!(error = %e, "sanitizer could not run; continuing startup"),
    }

    info!(service = "sanitizer", event = "ready", %service_id, pid, "host startup continues");
    Ok(())
}

async fn run_sanitizer(cfg: &configs::AppConfig) -> anyhow::Result<models::Outcome> {
    common::env::ensure_env(&cfg.store.data_dir).await?;
    let store = JsonPrefStore::open(cfg.store.path.as_str()).await?;
    let sanitizer =
        Sanitizer::new(store, policy::from_config(&cfg.sanitizer), Arc::new(TracingSink));
    Ok(sanitizer.run().await)
}
