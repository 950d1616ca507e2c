//! # booker-core
//!
//! Core crate for the event booker. Contains configuration schemas, the
//! clock and notifier seams, and the unified error system.
//!
//! This crate has **no** internal dependencies on other booker crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, BookingError, ErrorKind};
pub use result::AppResult;
