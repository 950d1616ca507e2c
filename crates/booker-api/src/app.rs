//! Application builder: wires router, middleware and state into an Axum app,
//! and runs it alongside the expiry reconciler.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use booker_core::config::AppConfig;
use booker_core::error::AppError;
use booker_core::traits::{Clock, Notifier};
use booker_database::Stores;
use booker_notify::{NotificationDispatcher, TelegramNotifier};
use booker_worker::{ExpiryReconciler, ReconcilerScheduler};

use crate::router::build_router;
use crate::state::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds.max(1));

    build_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Runs the HTTP server and the reconciler until a shutdown signal.
///
/// On shutdown the listener drains in-flight requests, the reconciler is
/// given `shutdown_grace_seconds` to finish its current booking, and the
/// stores are closed.
pub async fn run_server(
    config: AppConfig,
    stores: Stores,
    clock: Arc<dyn Clock>,
) -> Result<(), AppError> {
    info!("Starting event booker server...");

    let notifier = TelegramNotifier::from_config(&config.notifications.telegram)?
        .map(|n| Arc::new(n) as Arc<dyn Notifier>);
    if notifier.is_none() {
        info!("Telegram bot token not configured; notifications disabled");
    }
    let dispatcher = NotificationDispatcher::new(notifier);

    let scheduler = if config.reconciler.enabled {
        let reconciler = Arc::new(ExpiryReconciler::new(
            Arc::clone(&stores.inventory),
            Arc::clone(&stores.engine),
            Arc::clone(&stores.users),
            dispatcher.clone(),
            Arc::clone(&clock),
        ));
        Some(ReconcilerScheduler::start(reconciler, &config.reconciler))
    } else {
        info!("Expiry reconciler disabled");
        None
    };

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(Arc::new(config), stores.clone(), dispatcher, clock);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Event booker listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    if let Some(scheduler) = scheduler {
        scheduler.stop(grace).await;
    }
    stores.close().await;
    info!("Event booker stopped");

    served
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
