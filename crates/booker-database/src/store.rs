//! Store traits shared by the PostgreSQL and in-memory backends.
//!
//! [`BookingEngine`] is the only writer of seat counters and booking
//! status. Each of its operations is one all-or-nothing unit that locks the
//! rows it touches before reading them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use booker_core::result::AppResult;
use booker_entity::booking::Booking;
use booker_entity::event::Event;
use booker_entity::user::User;

/// Read access to events and bookings, plus event creation.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
    /// Persist a freshly built event.
    async fn create_event(&self, event: &Event) -> AppResult<Event>;

    /// Find an event by id.
    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// All events ordered by date ascending.
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    /// Find a booking by id.
    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Bookings of an event, newest first.
    async fn list_bookings_by_event(&self, event_id: Uuid) -> AppResult<Vec<Booking>>;

    /// Reserved bookings with `deadline <= now`, oldest deadline first.
    async fn expired_reservations(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// The three atomic booking transitions.
#[async_trait]
pub trait BookingEngine: Send + Sync + 'static {
    /// Admit `user_id` to `event_id`, reserving or booking one seat.
    async fn create_booking(&self, event_id: Uuid, user_id: Uuid) -> AppResult<Booking>;

    /// Move a reservation to confirmed before its deadline.
    async fn confirm_booking(&self, booking_id: Uuid) -> AppResult<()>;

    /// Cancel a reservation and release its seat. Deadlines are the
    /// caller's concern.
    async fn cancel_expired_booking(&self, booking_id: Uuid) -> AppResult<()>;
}

/// User registration and lookup.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new user. Duplicate email or telegram id is a conflict.
    async fn create_user(&self, user: &User) -> AppResult<User>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
}
