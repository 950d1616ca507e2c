//! Event repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use booker_core::error::{AppError, ErrorKind};
use booker_core::result::AppResult;
use booker_entity::event::Event;

/// Repository for event rows.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// List all events, soonest first.
    pub async fn find_all(&self) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Insert an event row.
    pub async fn create(&self, event: &Event) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, date, total_seats, reserved_seats, booked_seats, \
                                 booking_lifetime, requires_payment_confirmation, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(event.date)
        .bind(event.total_seats)
        .bind(event.reserved_seats)
        .bind(event.booked_seats)
        .bind(event.booking_lifetime)
        .bind(event.requires_payment_confirmation)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
                AppError::validation(format!("Event rejected by schema: {db_err}"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create event", e),
        })
    }
}
