//! Database migration command.

use booker_core::error::AppError;
use booker_database::Stores;

use crate::output;

/// Apply pending migrations to the configured database.
pub async fn execute(stores: &Stores) -> Result<(), AppError> {
    if stores.pool().is_none() {
        output::print_warning("In-memory store configured; nothing to migrate.");
        return Ok(());
    }

    println!("Running database migrations...");
    stores.migrate().await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
