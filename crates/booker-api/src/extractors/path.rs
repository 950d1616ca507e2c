//! Typed path parameter helpers.

use uuid::Uuid;

use booker_core::error::AppError;

/// Parses a UUID from a path segment or body field named `what`.
pub fn parse_uuid(what: &str, s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s.trim()).map_err(|_| AppError::validation(format!("invalid {what}: {s}")))
}
