//! Request DTOs with validation.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use booker_core::error::AppError;
use booker_entity::event::CreateEvent;
use booker_entity::user::CreateUser;

/// Register user request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name; letters and whitespace.
    #[validate(custom(function = "validate_person_name"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Telegram chat id for notifications; 7 to 10 digits.
    #[validate(range(
        min = 1000000i64,
        max = 9999999999i64,
        message = "must be a valid telegram id"
    ))]
    pub telegram_id: Option<i64>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            email: req.email,
            telegram_id: req.telegram_id,
        }
    }
}

/// Create event request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_event_lifetime"))]
pub struct CreateEventRequest {
    /// Event name.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// RFC 3339 timestamp of the event.
    #[validate(custom(function = "validate_rfc3339"))]
    pub date: String,
    /// Seat capacity.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub total_seats: i32,
    /// Reservation lifetime, hours part.
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub booking_lifetime_hours: i32,
    /// Reservation lifetime, minutes part.
    #[serde(default)]
    #[validate(range(min = 0, max = 59, message = "must be between 0 and 59"))]
    pub booking_lifetime_minutes: i32,
    /// Whether seats are held until confirmed.
    #[serde(default)]
    pub requires_payment_confirmation: bool,
}

impl CreateEventRequest {
    /// Convert into service input. Call after validation.
    pub fn into_create_event(self) -> Result<CreateEvent, AppError> {
        let date = parse_rfc3339(&self.date).ok_or_else(|| {
            AppError::validation(format!("date: invalid RFC 3339 timestamp: {}", self.date))
        })?;
        let booking_lifetime =
            CreateEvent::lifetime_minutes(self.booking_lifetime_hours, self.booking_lifetime_minutes)
                .ok_or_else(|| AppError::validation("booking_lifetime: lifetime is too long"))?;
        Ok(CreateEvent {
            name: self.name.trim().to_string(),
            date,
            total_seats: self.total_seats,
            booking_lifetime,
            requires_payment_confirmation: self.requires_payment_confirmation,
        })
    }
}

/// Book event request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookEventRequest {
    /// Email the user registered with.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Confirm booking request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    /// The reservation to confirm.
    #[validate(custom(function = "validate_uuid"))]
    pub booking_id: String,
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "is required"));
    }
    Ok(())
}

fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !value.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(rule("person_name", "must contain only letters and spaces"));
    }
    Ok(())
}

fn validate_rfc3339(value: &str) -> Result<(), ValidationError> {
    match parse_rfc3339(value) {
        Some(_) => Ok(()),
        None => Err(rule("rfc3339", "must be an RFC 3339 timestamp")),
    }
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    match uuid::Uuid::parse_str(value.trim()) {
        Ok(_) => Ok(()),
        Err(_) => Err(rule("uuid", "must be a valid UUID")),
    }
}

fn validate_event_lifetime(req: &CreateEventRequest) -> Result<(), ValidationError> {
    let Some(lifetime) =
        CreateEvent::lifetime_minutes(req.booking_lifetime_hours, req.booking_lifetime_minutes)
    else {
        return Err(rule("booking_lifetime", "booking lifetime is too long"));
    };
    if req.requires_payment_confirmation && lifetime < 1 {
        return Err(rule(
            "booking_lifetime",
            "booking lifetime must be at least 1 minute when payment confirmation is required",
        ));
    }
    Ok(())
}
