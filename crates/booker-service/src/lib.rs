//! # booker-service
//!
//! Request-level orchestration for the event booker. Services compose
//! identity lookup, the booking engine and notifications, and map missing
//! rows to named booking outcomes.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod booking;
pub mod event;
pub mod user;

pub use booking::{BookingReceipt, BookingService};
pub use event::EventService;
pub use user::UserService;
