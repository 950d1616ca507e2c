//! Route definitions for the event booker HTTP API.
//!
//! Routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(event_routes())
        .merge(booking_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(handlers::user::create_user))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route("/events/{id}", get(handlers::event::get_event))
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/book", post(handlers::booking::book_event))
        .route("/events/{id}/confirm", post(handlers::booking::confirm_booking))
        .route("/events/{id}/bookings", get(handlers::booking::list_bookings))
}
