//! Booking entity model.

use booker_core::error::BookingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;
use crate::event::Event;

/// A user's claim on one seat of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The event the seat belongs to.
    pub event_id: Uuid,
    /// The user holding the seat.
    pub user_id: Uuid,
    /// Current lifecycle state.
    pub status: BookingStatus,
    /// Expiry instant of a reservation. For direct bookings this is the
    /// event date and carries no expiry meaning.
    pub deadline: DateTime<Utc>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Open a booking on `event` for `user_id`.
    ///
    /// Events that require payment get a reservation expiring after the
    /// event's lifetime; others are confirmed on the spot. The caller is
    /// responsible for the matching seat counter change.
    pub fn open(event: &Event, user_id: Uuid, now: DateTime<Utc>) -> Self {
        let (status, deadline) = if event.requires_payment_confirmation {
            (BookingStatus::Reserved, now + event.reservation_lifetime())
        } else {
            (BookingStatus::Confirmed, event.date)
        };
        Self {
            id: Uuid::new_v4(),
            event_id: event.id,
            user_id,
            status,
            deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the booking still holds a reserved seat.
    pub fn is_reserved(&self) -> bool {
        self.status == BookingStatus::Reserved
    }

    /// Whether the reservation deadline is behind `now`.
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }

    /// Check that the booking may be confirmed at `now`.
    pub fn check_confirmable(&self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if !self.is_reserved() {
            return Err(BookingError::BookingNotReserved);
        }
        if self.is_past_deadline(now) {
            return Err(BookingError::BookingDeadlinePassed);
        }
        Ok(())
    }

    /// Check that the booking may be cancelled. Deadlines are not consulted.
    pub fn check_cancellable(&self) -> Result<(), BookingError> {
        if !self.is_reserved() {
            return Err(BookingError::BookingNotReserved);
        }
        Ok(())
    }

    /// The deadline worth showing to the caller: only reservations expire.
    pub fn reservation_deadline(&self) -> Option<DateTime<Utc>> {
        self.is_reserved().then_some(self.deadline)
    }
}
