//! Booking listing command.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use booker_core::error::AppError;
use booker_core::traits::Clock;
use booker_database::Stores;
use booker_entity::booking::Booking;
use booker_notify::NotificationDispatcher;
use booker_service::BookingService;

use crate::output::{self, OutputFormat};

/// Arguments for the bookings command
#[derive(Debug, Args)]
pub struct BookingsArgs {
    /// Event to list bookings for
    pub event_id: uuid::Uuid,
}

/// One row of the booking table.
#[derive(Debug, Serialize, Tabled)]
pub struct BookingRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "User")]
    pub user_id: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Deadline (UTC)")]
    pub deadline: String,
    #[tabled(rename = "Created (UTC)")]
    pub created_at: String,
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            user_id: booking.user_id.to_string(),
            status: booking.status.to_string(),
            deadline: booking
                .reservation_deadline()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            created_at: booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// List the bookings of one event.
pub async fn execute(
    args: &BookingsArgs,
    stores: &Stores,
    clock: Arc<dyn Clock>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = BookingService::new(
        Arc::clone(&stores.inventory),
        Arc::clone(&stores.engine),
        Arc::clone(&stores.users),
        NotificationDispatcher::disabled(),
        clock,
    );
    let bookings = service.list_bookings_by_event(args.event_id).await?;
    let rows: Vec<BookingRow> = bookings.iter().map(BookingRow::from).collect();
    output::print_list(&rows, format, "No bookings for this event.");
    Ok(())
}
