//! Booking status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a booking.
///
/// `Reserved` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Seat held pending payment confirmation.
    Reserved,
    /// Seat booked.
    Confirmed,
    /// Reservation released.
    Cancelled,
}

impl BookingStatus {
    /// Check if the booking can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }

    /// Check if the booking counts as the user's claim on the event.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Reserved | Self::Confirmed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
