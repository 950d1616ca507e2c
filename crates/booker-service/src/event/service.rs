//! Event creation and lookup.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use booker_core::error::{AppError, BookingError};
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_database::store::InventoryStore;
use booker_entity::event::{CreateEvent, Event};

/// Handles event creation and reads.
#[derive(Clone)]
pub struct EventService {
    inventory: Arc<dyn InventoryStore>,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(inventory: Arc<dyn InventoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self { inventory, clock }
    }

    /// Create an event with empty seat counters.
    pub async fn create_event(&self, input: CreateEvent) -> AppResult<Event> {
        let now = self.clock.now();
        let name = input.name.trim().to_string();

        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        if input.total_seats < 1 {
            return Err(AppError::validation("total_seats must be at least 1"));
        }
        if input.booking_lifetime < 0 {
            return Err(AppError::validation("booking lifetime cannot be negative"));
        }
        if input.requires_payment_confirmation && input.booking_lifetime < 1 {
            return Err(AppError::validation(
                "booking lifetime must be at least one minute when payment confirmation is required",
            ));
        }
        if input.date < now {
            return Err(AppError::validation("event date cannot be in the past"));
        }

        let event = Event::new(CreateEvent { name, ..input }, now);
        let event = self.inventory.create_event(&event).await?;

        info!(
            event_id = %event.id,
            total_seats = event.total_seats,
            requires_payment = event.requires_payment_confirmation,
            "Event created"
        );
        Ok(event)
    }

    /// Fetch one event.
    pub async fn get_event(&self, id: Uuid) -> AppResult<Event> {
        self.inventory
            .find_event(id)
            .await?
            .ok_or_else(|| BookingError::EventNotFound.into())
    }

    /// All events, soonest first.
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.inventory.list_events().await
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService").finish_non_exhaustive()
    }
}
