//! Event listing command.

use serde::Serialize;
use tabled::Tabled;

use booker_core::error::AppError;
use booker_database::Stores;
use booker_entity::event::Event;

use crate::output::{self, OutputFormat};

/// One row of the event table.
#[derive(Debug, Serialize, Tabled)]
pub struct EventRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Date (UTC)")]
    pub date: String,
    #[tabled(rename = "Total")]
    pub total_seats: i32,
    #[tabled(rename = "Reserved")]
    pub reserved_seats: i32,
    #[tabled(rename = "Booked")]
    pub booked_seats: i32,
    #[tabled(rename = "Available")]
    pub available_seats: i32,
    #[tabled(rename = "Payment")]
    pub requires_payment: bool,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            date: event.date.format("%Y-%m-%d %H:%M").to_string(),
            total_seats: event.total_seats,
            reserved_seats: event.reserved_seats,
            booked_seats: event.booked_seats,
            available_seats: event.available_seats(),
            requires_payment: event.requires_payment_confirmation,
        }
    }
}

/// List all events ordered by date.
pub async fn execute(stores: &Stores, format: OutputFormat) -> Result<(), AppError> {
    let events = stores.inventory.list_events().await?;
    let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
    output::print_list(&rows, format, "No events scheduled.");
    Ok(())
}
