//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use booker_core::config::AppConfig;
use booker_core::traits::Clock;
use booker_database::Stores;
use booker_notify::NotificationDispatcher;
use booker_service::{BookingService, EventService, UserService};

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store handles for the configured backend.
    pub stores: Stores,
    /// Event management.
    pub events: Arc<EventService>,
    /// User registration and lookup.
    pub users: Arc<UserService>,
    /// Booking orchestration.
    pub bookings: Arc<BookingService>,
}

impl AppState {
    /// Wire the services over `stores`.
    pub fn new(
        config: Arc<AppConfig>,
        stores: Stores,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let events = Arc::new(EventService::new(
            Arc::clone(&stores.inventory),
            Arc::clone(&clock),
        ));
        let users = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&clock),
        ));
        let bookings = Arc::new(BookingService::new(
            Arc::clone(&stores.inventory),
            Arc::clone(&stores.engine),
            Arc::clone(&stores.users),
            dispatcher,
            clock,
        ));

        Self {
            config,
            stores,
            events,
            users,
            bookings,
        }
    }
}
