//! Convenience result type alias for the event booker.

use crate::error::AppError;

/// A specialized `Result` type for booking operations.
pub type AppResult<T> = Result<T, AppError>;
