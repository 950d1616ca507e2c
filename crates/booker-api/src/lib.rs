//! # booker-api
//!
//! HTTP API layer for the event booker built on Axum.
//!
//! Provides the REST endpoints, request logging, validated extractors,
//! DTOs, and the mapping from booking outcomes to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
