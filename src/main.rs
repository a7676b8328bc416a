use std::{env, sync::Arc};

use anyhow::{Context, Result};
use atlas_realty::{
    config::{self, Config},
    db::readiness::wait_for_ready,
    logger::{parse_level, setup_logger, LOG_LEVEL_ENV},
    web::{start_http_server, AppState},
};
use dotenvy::dotenv;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set LOG_LEVEL as well as the config variables
    dotenv().ok();

    // Initialize logger
    setup_logger(parse_level(&env::var(LOG_LEVEL_ENV).unwrap_or_default()))?;

    let config: Arc<Config> = Arc::new(config::read_config());
    info!("Starting Atlas Realty API v{}", env!("CARGO_PKG_VERSION"));

    // Nothing is served until the database answers
    let gate_config = config.clone();
    tokio::task::spawn_blocking(move || {
        wait_for_ready(&gate_config, gate_config.ready_max_attempts)
    })
    .await
    .context("readiness gate did not finish")?
    .context("database not available after maximum retries")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                error!("Failed to listen for shutdown signal: {err}");
                // the sender stays alive, so the server keeps running
                std::future::pending::<()>().await;
            }
        }
    });

    start_http_server(AppState { config }, shutdown_rx).await
}
