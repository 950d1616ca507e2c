//! Booking repository implementation.
//!
//! Read paths only; every booking write goes through the engine.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use booker_core::error::{AppError, ErrorKind};
use booker_core::result::AppResult;
use booker_entity::booking::{Booking, BookingStatus};

/// Repository for booking rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// List an event's bookings, newest first.
    pub async fn find_by_event(&self, event_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE event_id = $1 ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list bookings by event", e)
        })
    }

    /// Reservations whose deadline is at or before `now`, oldest first.
    pub async fn find_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status = $1 AND deadline <= $2 ORDER BY deadline ASC",
        )
        .bind(BookingStatus::Reserved)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expired reservations", e)
        })
    }
}
