//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use booker_core::error::{AppError, BookingError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error; wraps [`AppError`] so it can be rendered as a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// HTTP status and error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Booking(outcome) => (booking_status(outcome), outcome.code()),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

fn booking_status(outcome: BookingError) -> StatusCode {
    if outcome.is_missing_resource() {
        StatusCode::NOT_FOUND
    } else if outcome.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, source = ?self.0.source, "Request failed");
            match self.0.kind {
                ErrorKind::ServiceUnavailable | ErrorKind::ExternalService => self.0.message,
                _ => "internal server error".to_string(),
            }
        } else {
            self.0.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Flattens validator output into a single 400 error.
///
/// Fields are listed in name order; struct-level failures come last.
pub fn validation_failure(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| field_order(&**a).cmp(&field_order(&**b)));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e.message.as_deref().unwrap_or(&*e.code);
                if &*field == SCHEMA_FIELD {
                    detail.to_string()
                } else {
                    format!("{}: {detail}", &*field)
                }
            })
        })
        .collect();

    ApiError(AppError::validation(parts.join("; ")))
}

/// Key under which validator files struct-level errors.
const SCHEMA_FIELD: &str = "__all__";

fn field_order(field: &str) -> (bool, &str) {
    (field == SCHEMA_FIELD, field)
}
