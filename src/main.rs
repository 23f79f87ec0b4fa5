use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use scanbridge::{Bridge, Database, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scanbridge.json"));
    let settings = Settings::load(&settings_path)?;

    info!("scanbridge starting up...");

    let database = Database::new(settings.database.path.clone())?;
    let bridge = Bridge::bind(&settings.listener, database).await?;

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {err}");
                return;
            }
            info!("ctrl-c received");
            shutdown.cancel();
        });
    }

    bridge.serve(shutdown).await
}
