//! Seatwise - exam seating allocation service
//!
//! Runs the seating server until interrupted.

use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seatwise_core::Database;
use seatwise_net::Server;

mod config;
mod error;
mod roster_import;

use config::AppConfig;
use error::Result;

#[tokio::main]
async fn main() {
    // Config is read before logging so its filter can apply
    let config = AppConfig::load();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let fallback = config
            .as_ref()
            .map(|c| c.log_filter.as_str())
            .unwrap_or("info");
        EnvFilter::new(fallback)
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    tracing::info!("Starting Seatwise");

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!("Seatwise failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<()> {
    let db_path = config.database_path()?;

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::open(&db_path)?;
    tracing::info!(path = %db_path.display(), schema = db.schema_version()?, "Database ready");

    if let Some(roster) = &config.roster_file {
        roster_import::import_roster(&db, roster)?;
    }

    let server = Server::start(config.listen_addr, Arc::new(Mutex::new(db))).await?;
    tracing::info!(addr = %server.addr(), "Accepting requests");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    Ok(())
}
