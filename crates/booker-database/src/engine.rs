//! Transactional booking engine over PostgreSQL.
//!
//! Every operation runs in one transaction and takes `FOR UPDATE` locks on
//! the rows it reads, so concurrent calls against the same event or booking
//! are strictly ordered. Dropping a future mid-operation drops the open
//! transaction, which rolls back.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use booker_core::error::{AppError, BookingError, ErrorKind};
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_entity::booking::{Booking, BookingStatus};
use booker_entity::event::Event;

use crate::store::BookingEngine;

/// Name of the partial unique index guarding one live claim per user and event.
const LIVE_CLAIM_INDEX: &str = "bookings_live_claim_key";

/// Foreign key from bookings to users.
const BOOKING_USER_FK: &str = "bookings_user_id_fkey";

/// PostgreSQL implementation of [`BookingEngine`].
#[derive(Clone)]
pub struct PgBookingEngine {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PgBookingEngine {
    /// Create an engine reading time from `clock`.
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    async fn begin(&self, op: &'static str) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(db_error(op, "begin"))
    }
}

impl std::fmt::Debug for PgBookingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgBookingEngine").finish_non_exhaustive()
    }
}

/// Wrap a sqlx error with the operation and step it happened in.
fn db_error(op: &'static str, step: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, format!("{op}: {step}"), e)
}

async fn lock_event(
    tx: &mut Transaction<'static, Postgres>,
    op: &'static str,
    event_id: Uuid,
) -> AppResult<Option<Event>> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error(op, "lock event"))
}

async fn lock_booking(
    tx: &mut Transaction<'static, Postgres>,
    op: &'static str,
    booking_id: Uuid,
) -> AppResult<Booking> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error(op, "lock booking"))?
        .ok_or_else(|| BookingError::BookingNotFound.into())
}

#[async_trait]
impl BookingEngine for PgBookingEngine {
    async fn create_booking(&self, event_id: Uuid, user_id: Uuid) -> AppResult<Booking> {
        const OP: &str = "create_booking";
        let now = self.clock.now();
        let mut tx = self.begin(OP).await?;

        let event = lock_event(&mut tx, OP, event_id)
            .await?
            .ok_or(BookingError::EventNotFound)?;
        event.check_admission(now)?;

        let already_booked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE event_id = $1 AND user_id = $2 AND status IN ('reserved', 'confirmed'))",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error(OP, "check live claim"))?;
        if already_booked {
            return Err(BookingError::UserAlreadyBookedThisEvent.into());
        }

        let booking = Booking::open(&event, user_id, now);
        let counter_update = match booking.status {
            BookingStatus::Reserved => {
                "UPDATE events SET reserved_seats = reserved_seats + 1 WHERE id = $1"
            }
            _ => "UPDATE events SET booked_seats = booked_seats + 1 WHERE id = $1",
        };
        sqlx::query(counter_update)
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP, "update seat counters"))?;

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_id, user_id, status, deadline, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(booking.id)
        .bind(booking.event_id)
        .bind(booking.user_id)
        .bind(booking.status)
        .bind(booking.deadline)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(LIVE_CLAIM_INDEX) => {
                BookingError::UserAlreadyBookedThisEvent.into()
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(BOOKING_USER_FK) => {
                BookingError::UserNotFound.into()
            }
            _ => db_error(OP, "insert booking")(e),
        })?;

        tx.commit().await.map_err(db_error(OP, "commit"))?;
        debug!(booking_id = %booking.id, event_id = %event_id, status = %booking.status, "Booking created");
        Ok(booking)
    }

    async fn confirm_booking(&self, booking_id: Uuid) -> AppResult<()> {
        const OP: &str = "confirm_booking";
        let now = self.clock.now();
        let mut tx = self.begin(OP).await?;

        let booking = lock_booking(&mut tx, OP, booking_id).await?;
        booking.check_confirmable(now)?;
        // Held for the counter update below; the row itself is not read.
        let _event = lock_event(&mut tx, OP, booking.event_id).await?;

        sqlx::query("UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(booking_id)
            .bind(BookingStatus::Confirmed)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP, "update booking"))?;

        sqlx::query(
            "UPDATE events SET reserved_seats = reserved_seats - 1, \
                               booked_seats = booked_seats + 1 \
             WHERE id = $1",
        )
        .bind(booking.event_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error(OP, "update seat counters"))?;

        tx.commit().await.map_err(db_error(OP, "commit"))?;
        debug!(booking_id = %booking_id, "Booking confirmed");
        Ok(())
    }

    async fn cancel_expired_booking(&self, booking_id: Uuid) -> AppResult<()> {
        const OP: &str = "cancel_expired_booking";
        let now = self.clock.now();
        let mut tx = self.begin(OP).await?;

        let booking = lock_booking(&mut tx, OP, booking_id).await?;
        booking.check_cancellable()?;
        // Held for the counter update below; the row itself is not read.
        let _event = lock_event(&mut tx, OP, booking.event_id).await?;

        sqlx::query("UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(booking_id)
            .bind(BookingStatus::Cancelled)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP, "update booking"))?;

        sqlx::query("UPDATE events SET reserved_seats = reserved_seats - 1 WHERE id = $1")
            .bind(booking.event_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error(OP, "update seat counters"))?;

        tx.commit().await.map_err(db_error(OP, "commit"))?;
        debug!(booking_id = %booking_id, "Reservation cancelled");
        Ok(())
    }
}
