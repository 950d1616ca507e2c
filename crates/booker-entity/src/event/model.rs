//! Event entity model.

use booker_core::error::BookingError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled event with a fixed seat capacity.
///
/// `reserved_seats + booked_seats <= total_seats` holds for every row the
/// store hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event name.
    pub name: String,
    /// When the event takes place (UTC).
    pub date: DateTime<Utc>,
    /// Seat capacity, immutable after creation.
    pub total_seats: i32,
    /// Seats held by unconfirmed reservations.
    pub reserved_seats: i32,
    /// Seats held by confirmed bookings.
    pub booked_seats: i32,
    /// Minutes a reservation is held before it expires.
    pub booking_lifetime: i32,
    /// Whether bookings start out reserved and must be confirmed.
    pub requires_payment_confirmation: bool,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Build a new event row with empty seat counters.
    pub fn new(input: CreateEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            date: input.date,
            total_seats: input.total_seats,
            reserved_seats: 0,
            booked_seats: 0,
            booking_lifetime: input.booking_lifetime,
            requires_payment_confirmation: input.requires_payment_confirmation,
            created_at: now,
        }
    }

    /// Seats neither reserved nor booked.
    pub fn available_seats(&self) -> i32 {
        self.total_seats - self.reserved_seats - self.booked_seats
    }

    /// Whether the event date is behind `now`.
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    /// Reservation lifetime as a duration.
    pub fn reservation_lifetime(&self) -> Duration {
        Duration::minutes(i64::from(self.booking_lifetime))
    }

    /// Check that a new booking may be admitted at `now`.
    pub fn check_admission(&self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if self.has_passed(now) {
            return Err(BookingError::EventExpired);
        }
        if self.available_seats() <= 0 {
            return Err(BookingError::NoAvailableSeats);
        }
        Ok(())
    }

    /// Count one more reservation.
    pub fn hold_seat(&mut self) {
        self.reserved_seats += 1;
    }

    /// Count one more confirmed booking.
    pub fn book_seat(&mut self) {
        self.booked_seats += 1;
    }

    /// Move one seat from reserved to booked.
    pub fn promote_hold(&mut self) {
        self.reserved_seats -= 1;
        self.booked_seats += 1;
    }

    /// Release one reserved seat.
    pub fn release_hold(&mut self) {
        self.reserved_seats -= 1;
    }
}

/// Data required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event name.
    pub name: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Seat capacity.
    pub total_seats: i32,
    /// Reservation lifetime in minutes.
    pub booking_lifetime: i32,
    /// Whether bookings must be confirmed.
    pub requires_payment_confirmation: bool,
}

impl CreateEvent {
    /// Combine an hours + minutes lifetime into minutes.
    ///
    /// Returns `None` when the total does not fit in an `i32`.
    pub fn lifetime_minutes(hours: i32, minutes: i32) -> Option<i32> {
        hours.checked_mul(60)?.checked_add(minutes)
    }
}
