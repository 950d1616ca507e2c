//! In-memory implementation of every store trait.
//!
//! One tokio mutex guards events, bookings and users together, so each
//! engine operation observes and mutates a consistent snapshot exactly like
//! a locked transaction would.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use booker_core::error::{AppError, BookingError};
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_entity::booking::{Booking, BookingStatus};
use booker_entity::event::Event;
use booker_entity::user::User;

use crate::store::{BookingEngine, InventoryStore, UserDirectory};

/// Rows held by the memory store.
#[derive(Debug, Default)]
struct InnerState {
    events: HashMap<Uuid, Event>,
    /// Insertion ordered.
    bookings: Vec<Booking>,
    users: HashMap<Uuid, User>,
}

impl InnerState {
    fn booking_mut(&mut self, id: Uuid) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == id)
    }

    fn has_live_claim(&self, event_id: Uuid, user_id: Uuid) -> bool {
        self.bookings
            .iter()
            .any(|b| b.event_id == event_id && b.user_id == user_id && b.status.is_live())
    }

    fn event_mut(&mut self, id: Uuid) -> AppResult<&mut Event> {
        self.events
            .get_mut(&id)
            .ok_or_else(|| AppError::internal(format!("booking references missing event {id}")))
    }
}

/// In-memory store using a tokio mutex for atomicity.
///
/// Clones share state.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InnerState::default())),
            clock,
        }
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn create_event(&self, event: &Event) -> AppResult<Event> {
        let mut state = self.state.lock().await;
        if state.events.contains_key(&event.id) {
            return Err(AppError::conflict(format!("event {} already exists", event.id)));
        }
        state.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        Ok(self.state.lock().await.events.get(&id).cloned())
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        let state = self.state.lock().await;
        let mut events: Vec<Event> = state.events.values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(events)
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bookings_by_event(&self, event_id: Uuid) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .rev()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn expired_reservations(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut expired: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.is_reserved() && b.deadline <= now)
            .cloned()
            .collect();
        expired.sort_by_key(|b| b.deadline);
        Ok(expired)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl BookingEngine for MemoryStore {
    async fn create_booking(&self, event_id: Uuid, user_id: Uuid) -> AppResult<Booking> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let event = state
            .events
            .get(&event_id)
            .ok_or(BookingError::EventNotFound)?;
        event.check_admission(now)?;
        if state.has_live_claim(event_id, user_id) {
            return Err(BookingError::UserAlreadyBookedThisEvent.into());
        }
        if !state.users.contains_key(&user_id) {
            return Err(BookingError::UserNotFound.into());
        }

        let booking = Booking::open(event, user_id, now);
        let event = state.event_mut(event_id)?;
        match booking.status {
            BookingStatus::Reserved => event.hold_seat(),
            _ => event.book_seat(),
        }
        state.bookings.push(booking.clone());

        debug!(booking_id = %booking.id, event_id = %event_id, status = %booking.status, "Booking created");
        Ok(booking)
    }

    async fn confirm_booking(&self, booking_id: Uuid) -> AppResult<()> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let booking = state
            .booking_mut(booking_id)
            .ok_or(BookingError::BookingNotFound)?;
        booking.check_confirmable(now)?;
        let event_id = booking.event_id;

        state.event_mut(event_id)?.promote_hold();
        if let Some(booking) = state.booking_mut(booking_id) {
            booking.status = BookingStatus::Confirmed;
            booking.updated_at = now;
        }

        debug!(booking_id = %booking_id, "Booking confirmed");
        Ok(())
    }

    async fn cancel_expired_booking(&self, booking_id: Uuid) -> AppResult<()> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let booking = state
            .booking_mut(booking_id)
            .ok_or(BookingError::BookingNotFound)?;
        booking.check_cancellable()?;
        let event_id = booking.event_id;

        state.event_mut(event_id)?.release_hold();
        if let Some(booking) = state.booking_mut(booking_id) {
            booking.status = BookingStatus::Cancelled;
            booking.updated_at = now;
        }

        debug!(booking_id = %booking_id, "Reservation cancelled");
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create_user(&self, user: &User) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("email already exists"));
        }
        if user.telegram_id.is_some()
            && state
                .users
                .values()
                .any(|u| u.telegram_id == user.telegram_id)
        {
            return Err(AppError::conflict("telegram id already exists"));
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}
