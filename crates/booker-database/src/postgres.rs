//! PostgreSQL-backed [`InventoryStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use booker_core::result::AppResult;
use booker_entity::booking::Booking;
use booker_entity::event::Event;

use crate::connection::DatabasePool;
use crate::repositories::{BookingRepository, EventRepository};
use crate::store::InventoryStore;

/// Inventory reads and event creation over the event and booking repositories.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    db: DatabasePool,
    events: EventRepository,
    bookings: BookingRepository,
}

impl PgInventoryStore {
    /// Build the store over an open pool.
    pub fn new(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            events: EventRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
            db,
        }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn create_event(&self, event: &Event) -> AppResult<Event> {
        self.events.create(event).await
    }

    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.events.find_all().await
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        self.bookings.find_by_id(id).await
    }

    async fn list_bookings_by_event(&self, event_id: Uuid) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_event(event_id).await
    }

    async fn expired_reservations(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        self.bookings.find_expired(now).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }
}
