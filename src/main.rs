//! Event booker server.
//!
//! Main entry point that wires the crates together and starts the HTTP
//! server and the expiry reconciler.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use booker_core::config::AppConfig;
use booker_core::error::AppError;
use booker_core::traits::{Clock, SystemClock};
use booker_database::Stores;

#[tokio::main]
async fn main() {
    let env = std::env::var("BOOKER_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Open the store, apply migrations and serve until shutdown
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting event booker v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let stores = Stores::open(&config.database, Arc::clone(&clock)).await?;

    tracing::info!("Running database migrations...");
    stores.migrate().await?;

    booker_api::run_server(config, stores, clock).await
}
