//! CLI command definitions and dispatch.

pub mod bookings;
pub mod events;
pub mod migrate;
pub mod sweep;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use booker_core::config::AppConfig;
use booker_core::error::AppError;
use booker_core::traits::{Clock, SystemClock};
use booker_database::Stores;

use crate::output::OutputFormat;

/// Event booker administration
#[derive(Debug, Parser)]
#[command(name = "booker-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(short, long, global = true, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Cancel reservations past their deadline once and print the summary
    Sweep,
    /// List events with their seat counters
    Events,
    /// List the bookings of one event, newest first
    Bookings(bookings::BookingsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let stores = Stores::open(&config.database, Arc::clone(&clock)).await?;

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&stores).await,
            Commands::Sweep => sweep::execute(&config, &stores, clock, self.format).await,
            Commands::Events => events::execute(&stores, self.format).await,
            Commands::Bookings(args) => bookings::execute(args, &stores, clock, self.format).await,
        };

        stores.close().await;
        result
    }
}
