//! Event management.

pub mod service;

pub use service::EventService;
