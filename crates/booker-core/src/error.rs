//! Unified application error types for the event booker.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. Booking-lifecycle outcomes are
//! carried as [`BookingError`] inside [`ErrorKind::Booking`] so callers can
//! branch on them by identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named, non-retriable outcomes of the booking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum BookingError {
    /// The event does not exist.
    #[error("event not found")]
    EventNotFound,
    /// The event date has already passed.
    #[error("event has expired")]
    EventExpired,
    /// Every seat is either reserved or booked.
    #[error("no available seats")]
    NoAvailableSeats,
    /// No user is registered under the given identity.
    #[error("user not found")]
    UserNotFound,
    /// The user already holds a reserved or confirmed booking for the event.
    #[error("user already has a booking for this event")]
    UserAlreadyBookedThisEvent,
    /// The booking does not exist (or belongs to another event).
    #[error("booking not found")]
    BookingNotFound,
    /// The booking has already left the reserved state.
    #[error("booking is not in reserved status")]
    BookingNotReserved,
    /// The reservation deadline is behind us.
    #[error("booking deadline has passed")]
    BookingDeadlinePassed,
    /// Confirmation was requested for an event that books directly.
    #[error("event does not require payment confirmation")]
    EventDoesNotRequirePayment,
}

impl BookingError {
    /// Machine-readable code used in API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::EventExpired => "EVENT_EXPIRED",
            Self::NoAvailableSeats => "NO_AVAILABLE_SEATS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyBookedThisEvent => "USER_ALREADY_BOOKED",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::BookingNotReserved => "BOOKING_NOT_RESERVED",
            Self::BookingDeadlinePassed => "BOOKING_DEADLINE_PASSED",
            Self::EventDoesNotRequirePayment => "EVENT_DOES_NOT_REQUIRE_PAYMENT",
        }
    }

    /// Whether the outcome means a referenced resource is missing.
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound | Self::UserNotFound | Self::BookingNotFound
        )
    }

    /// Whether the outcome is a conflict with current seat or claim state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::NoAvailableSeats | Self::UserAlreadyBookedThisEvent)
    }
}

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A booking-lifecycle outcome.
    Booking(BookingError),
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, etc.).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external service error occurred.
    ExternalService,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Booking(e) => write!(f, "{}", e.code()),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// The booking outcome carried by this error, if any.
    pub fn booking_error(&self) -> Option<BookingError> {
        match self.kind {
            ErrorKind::Booking(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this error is exactly the given booking outcome.
    pub fn is_booking(&self, expected: BookingError) -> bool {
        self.booking_error() == Some(expected)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        Self::new(ErrorKind::Booking(err), err.to_string())
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
