//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use booker_entity::booking::{Booking, BookingStatus};
use booker_entity::event::Event;
use booker_entity::user::User;
use booker_service::BookingReceipt;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Store connectivity.
    pub database: String,
    /// Server version.
    pub version: String,
}

/// An event with its derived seat count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    /// The stored event.
    #[serde(flatten)]
    pub event: Event,
    /// `total_seats - reserved_seats - booked_seats`.
    pub available_seats: i32,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        let available_seats = event.available_seats();
        Self {
            event,
            available_seats,
        }
    }
}

/// Single event response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    /// The event.
    pub event: EventView,
    /// Outcome message for writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Event listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    /// Events ordered by date.
    pub events: Vec<EventView>,
}

/// Registered user response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// The user.
    pub user: User,
    /// Outcome message.
    pub message: String,
}

/// Successful booking response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    /// The new booking.
    pub booking_id: Uuid,
    /// `reserved` or `confirmed`.
    pub status: BookingStatus,
    /// Confirmation deadline of a reservation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    /// Outcome message.
    pub message: String,
}

impl From<BookingReceipt> for BookingCreatedResponse {
    fn from(receipt: BookingReceipt) -> Self {
        Self {
            booking_id: receipt.booking_id,
            status: receipt.status,
            deadline: receipt.deadline,
            message: "booking created successfully".to_string(),
        }
    }
}

/// Booking listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    /// Bookings, newest first.
    pub bookings: Vec<Booking>,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}
