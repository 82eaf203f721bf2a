//! Flight Risk Dashboard - Main Entry Point

use dashboard::{init_logging, run, Settings};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config path: first argument, else AEROSAFE_CONFIG
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AEROSAFE_CONFIG").ok())
        .map(PathBuf::from);

    let settings = Settings::load(config_path.as_deref())?;
    init_logging(&settings.log_level, settings.log_json)?;

    info!("=== AeroSafe Flight Risk Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Loaded settings from {}", path.display());
    }

    run(settings).await
}
