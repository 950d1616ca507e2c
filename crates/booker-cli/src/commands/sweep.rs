//! One-shot expiry reconciliation.

use std::sync::Arc;

use tokio::sync::watch;

use booker_core::config::AppConfig;
use booker_core::error::AppError;
use booker_core::traits::{Clock, Notifier};
use booker_database::Stores;
use booker_notify::{NotificationDispatcher, TelegramNotifier};
use booker_worker::ExpiryReconciler;

use crate::output::{self, OutputFormat};

/// Run one sweep. Ctrl+C stops it between bookings.
pub async fn execute(
    config: &AppConfig,
    stores: &Stores,
    clock: Arc<dyn Clock>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let notifier = TelegramNotifier::from_config(&config.notifications.telegram)?
        .map(|n| Arc::new(n) as Arc<dyn Notifier>);
    let reconciler = ExpiryReconciler::new(
        Arc::clone(&stores.inventory),
        Arc::clone(&stores.engine),
        Arc::clone(&stores.users),
        NotificationDispatcher::new(notifier),
        clock,
    );

    let (shutdown, running) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(true);
        }
    });
    let report = reconciler.sweep(&running).await;
    interrupt.abort();
    let report = report?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            println!("Expiry sweep:");
            output::print_kv("Found", &report.found.to_string());
            output::print_kv("Cancelled", &report.cancelled.to_string());
            output::print_kv("Skipped", &report.skipped.to_string());
            output::print_kv("Failed", &report.failed.to_string());
            output::print_kv("Notified", &report.notified.to_string());
        }
    }

    if report.failed > 0 {
        output::print_warning("Some reservations could not be cancelled; see the log.");
    }
    Ok(())
}
