//! Booking orchestration.

pub mod service;

pub use service::{BookingReceipt, BookingService};
