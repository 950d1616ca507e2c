//! Notification message formatting.

use chrono::{DateTime, Utc};

use booker_entity::booking::Booking;
use booker_entity::event::Event;

/// Display format for event dates and deadlines.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_instant(instant: DateTime<Utc>) -> String {
    format!("{} UTC", instant.format(DATE_FORMAT))
}

/// Formats plain-text messages for booking lifecycle changes.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// A reservation was released because its deadline passed.
    pub fn reservation_cancelled(event: &Event, booking: &Booking) -> String {
        format!(
            "Your reservation for \"{}\" has been cancelled because it was not confirmed in time.\n\
             Booking ID: {}\n\
             Event: {} on {}",
            event.name,
            booking.id,
            event.name,
            format_instant(event.date),
        )
    }

    /// A booking was created, either held or booked outright.
    pub fn booking_created(event: &Event, booking: &Booking) -> String {
        match booking.reservation_deadline() {
            Some(deadline) => format!(
                "Seat reserved for \"{}\" on {}.\n\
                 Booking ID: {}\n\
                 Please confirm before {}, otherwise the reservation is released.",
                event.name,
                format_instant(event.date),
                booking.id,
                format_instant(deadline),
            ),
            None => format!(
                "Seat booked for \"{}\" on {}.\nBooking ID: {}",
                event.name,
                format_instant(event.date),
                booking.id,
            ),
        }
    }

    /// A reservation was confirmed.
    pub fn booking_confirmed(event: &Event, booking_id: uuid::Uuid) -> String {
        format!(
            "Your booking for \"{}\" on {} is confirmed.\nBooking ID: {}",
            event.name,
            format_instant(event.date),
            booking_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use booker_entity::event::CreateEvent;

    use super::*;

    fn event(requires_payment: bool) -> Event {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Event::new(
            CreateEvent {
                name: "Go Conference".into(),
                date: Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap(),
                total_seats: 10,
                booking_lifetime: 15,
                requires_payment_confirmation: requires_payment,
            },
            now,
        )
    }

    #[test]
    fn test_cancellation_names_event_booking_and_date() {
        let e = event(true);
        let b = Booking::open(&e, Uuid::new_v4(), e.created_at);
        let text = NotificationFormatter::reservation_cancelled(&e, &b);
        assert!(text.contains("\"Go Conference\""));
        assert!(text.contains(&b.id.to_string()));
        assert!(text.contains("2026-03-14 18:30 UTC"));
    }

    #[test]
    fn test_created_mentions_deadline_only_for_reservations() {
        let held = event(true);
        let b = Booking::open(&held, Uuid::new_v4(), held.created_at);
        let text = NotificationFormatter::booking_created(&held, &b);
        let deadline = held.created_at + Duration::minutes(15);
        assert!(text.contains(&format_instant(deadline)));

        let direct = event(false);
        let b = Booking::open(&direct, Uuid::new_v4(), direct.created_at);
        let text = NotificationFormatter::booking_created(&direct, &b);
        assert!(text.starts_with("Seat booked"));
        assert!(!text.contains("confirm before"));
    }
}
