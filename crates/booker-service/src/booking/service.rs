//! Booking orchestration: book, confirm, list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use booker_core::error::BookingError;
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_database::store::{BookingEngine, InventoryStore, UserDirectory};
use booker_entity::booking::{Booking, BookingStatus};
use booker_entity::user::User;
use booker_notify::{NotificationDispatcher, NotificationFormatter};

use crate::user::service::normalize_email;

/// Result of a successful booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    /// The new booking.
    pub booking_id: Uuid,
    /// `reserved` or `confirmed`.
    pub status: BookingStatus,
    /// Confirmation deadline; present only for reservations.
    pub deadline: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingReceipt {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            status: booking.status,
            deadline: booking.reservation_deadline(),
        }
    }
}

/// Composes identity lookup, the booking engine and notifications.
#[derive(Clone)]
pub struct BookingService {
    inventory: Arc<dyn InventoryStore>,
    engine: Arc<dyn BookingEngine>,
    users: Arc<dyn UserDirectory>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        engine: Arc<dyn BookingEngine>,
        users: Arc<dyn UserDirectory>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inventory,
            engine,
            users,
            dispatcher,
            clock,
        }
    }

    /// Book a seat on `event_id` for the user registered under `email`.
    pub async fn book_event(&self, event_id: Uuid, email: &str) -> AppResult<BookingReceipt> {
        let user = self
            .users
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or(BookingError::UserNotFound)?;

        let booking = self.engine.create_booking(event_id, user.id).await?;
        info!(
            booking_id = %booking.id,
            event_id = %event_id,
            user_id = %user.id,
            status = %booking.status,
            "Seat booked"
        );

        self.announce_created(user, booking.clone());
        Ok(BookingReceipt::from(&booking))
    }

    /// Confirm a reservation that belongs to `event_id`.
    pub async fn confirm_booking(&self, event_id: Uuid, booking_id: Uuid) -> AppResult<()> {
        let booking = self
            .inventory
            .find_booking(booking_id)
            .await?
            .filter(|b| b.event_id == event_id)
            .ok_or(BookingError::BookingNotFound)?;

        let event = self
            .inventory
            .find_event(event_id)
            .await?
            .ok_or(BookingError::EventNotFound)?;
        if event.has_passed(self.clock.now()) {
            return Err(BookingError::EventExpired.into());
        }
        if !event.requires_payment_confirmation {
            return Err(BookingError::EventDoesNotRequirePayment.into());
        }

        self.engine.confirm_booking(booking_id).await?;
        info!(booking_id = %booking_id, event_id = %event_id, "Reservation confirmed");

        if self.dispatcher.is_enabled() {
            let message = NotificationFormatter::booking_confirmed(&event, booking_id);
            self.notify_in_background(booking.user_id, message);
        }
        Ok(())
    }

    /// Bookings of an event, newest first.
    pub async fn list_bookings_by_event(&self, event_id: Uuid) -> AppResult<Vec<Booking>> {
        if self.inventory.find_event(event_id).await?.is_none() {
            return Err(BookingError::EventNotFound.into());
        }
        self.inventory.list_bookings_by_event(event_id).await
    }

    fn announce_created(&self, user: User, booking: Booking) {
        if !self.dispatcher.is_enabled() {
            return;
        }
        let inventory = self.inventory.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match inventory.find_event(booking.event_id).await {
                Ok(Some(event)) => {
                    let message = NotificationFormatter::booking_created(&event, &booking);
                    dispatcher.notify_user(&user, &message).await;
                }
                Ok(None) => debug!(booking_id = %booking.id, "Event vanished before notification"),
                Err(e) => warn!(booking_id = %booking.id, error = %e, "Failed to load event for notification"),
            }
        });
    }

    fn notify_in_background(&self, user_id: Uuid, message: String) {
        let users = self.users.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match users.find_user_by_id(user_id).await {
                Ok(Some(user)) => {
                    dispatcher.notify_user(&user, &message).await;
                }
                Ok(None) => debug!(user_id = %user_id, "User vanished before notification"),
                Err(e) => warn!(user_id = %user_id, error = %e, "Failed to load user for notification"),
            }
        });
    }
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use chrono::Duration;
    use tokio::sync::mpsc;

    use booker_core::error::AppError;
    use booker_core::traits::{ManualClock, Notifier};
    use booker_database::MemoryStore;
    use booker_entity::event::{CreateEvent, Event};
    use booker_entity::user::CreateUser;

    use super::*;

    struct ChannelNotifier(mpsc::UnboundedSender<(i64, String)>);

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn notify(&self, _user_id: Uuid, chat_id: i64, message: &str) -> AppResult<()> {
            self.0
                .send((chat_id, message.to_string()))
                .map_err(|_| AppError::external_service("receiver dropped"))
        }
    }

    struct Fixture {
        service: BookingService,
        store: MemoryStore,
        clock: ManualClock,
    }

    impl Fixture {
        fn new(dispatcher: NotificationDispatcher) -> Self {
            let clock = ManualClock::new(Utc::now());
            let shared: Arc<dyn Clock> = Arc::new(clock.clone());
            let store = MemoryStore::new(shared.clone());
            let service = BookingService::new(
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                dispatcher,
                shared,
            );
            Self {
                service,
                store,
                clock,
            }
        }

        async fn event(&self, seats: i32, requires_payment: bool) -> Event {
            let event = Event::new(
                CreateEvent {
                    name: "Launch Party".into(),
                    date: self.clock.now() + Duration::days(1),
                    total_seats: seats,
                    booking_lifetime: 10,
                    requires_payment_confirmation: requires_payment,
                },
                self.clock.now(),
            );
            self.store.create_event(&event).await.unwrap()
        }

        async fn user(&self, email: &str, telegram_id: Option<i64>) -> User {
            let user = User::new(
                CreateUser {
                    name: "Guest".into(),
                    email: email.into(),
                    telegram_id,
                },
                self.clock.now(),
            );
            self.store.create_user(&user).await.unwrap()
        }
    }

    #[tokio::test]
    async fn test_reservation_receipt_carries_deadline() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(2, true).await;
        fx.user("a@example.com", None).await;

        let receipt = fx.service.book_event(event.id, "A@example.com").await.unwrap();
        assert_eq!(receipt.status, BookingStatus::Reserved);
        assert_eq!(receipt.deadline, Some(fx.clock.now() + Duration::minutes(10)));
    }

    #[tokio::test]
    async fn test_direct_booking_receipt_has_no_deadline() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(2, false).await;
        fx.user("a@example.com", None).await;

        let receipt = fx.service.book_event(event.id, "a@example.com").await.unwrap();
        assert_eq!(receipt.status, BookingStatus::Confirmed);
        assert_eq!(receipt.deadline, None);

        let err = fx
            .service
            .confirm_booking(event.id, receipt.booking_id)
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::EventDoesNotRequirePayment));
    }

    #[tokio::test]
    async fn test_unknown_email_is_user_not_found() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(1, true).await;
        let err = fx.service.book_event(event.id, "nobody@example.com").await.unwrap_err();
        assert!(err.is_booking(BookingError::UserNotFound));
    }

    #[tokio::test]
    async fn test_cross_event_confirm_is_booking_not_found() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let first = fx.event(1, true).await;
        let second = fx.event(1, true).await;
        fx.user("a@example.com", None).await;

        let receipt = fx.service.book_event(first.id, "a@example.com").await.unwrap();
        let err = fx
            .service
            .confirm_booking(second.id, receipt.booking_id)
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::BookingNotFound));

        let err = fx
            .service
            .confirm_booking(first.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::BookingNotFound));
    }

    #[tokio::test]
    async fn test_confirm_after_event_date_is_event_expired() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(1, true).await;
        fx.user("a@example.com", None).await;
        let receipt = fx.service.book_event(event.id, "a@example.com").await.unwrap();

        fx.clock.set(event.date + Duration::minutes(1));
        let err = fx
            .service
            .confirm_booking(event.id, receipt.booking_id)
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::EventExpired));
    }

    #[tokio::test]
    async fn test_confirm_passes_engine_outcomes_through() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(2, true).await;
        fx.user("a@example.com", None).await;
        let receipt = fx.service.book_event(event.id, "a@example.com").await.unwrap();

        fx.service.confirm_booking(event.id, receipt.booking_id).await.unwrap();
        let err = fx
            .service
            .confirm_booking(event.id, receipt.booking_id)
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::BookingNotReserved));

        fx.user("b@example.com", None).await;
        let late = fx.service.book_event(event.id, "b@example.com").await.unwrap();
        fx.clock.advance(Duration::minutes(11));
        let err = fx
            .service
            .confirm_booking(event.id, late.booking_id)
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::BookingDeadlinePassed));
    }

    #[tokio::test]
    async fn test_list_bookings_newest_first() {
        let fx = Fixture::new(NotificationDispatcher::disabled());
        let event = fx.event(5, false).await;
        fx.user("a@example.com", None).await;
        fx.user("b@example.com", None).await;

        let a = fx.service.book_event(event.id, "a@example.com").await.unwrap();
        fx.clock.advance(Duration::seconds(5));
        let b = fx.service.book_event(event.id, "b@example.com").await.unwrap();

        let ids: Vec<Uuid> = fx
            .service
            .list_bookings_by_event(event.id)
            .await
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![b.booking_id, a.booking_id]);

        let err = fx
            .service
            .list_bookings_by_event(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_booking(BookingError::EventNotFound));
    }

    #[tokio::test]
    async fn test_notifications_follow_booking_and_confirmation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = NotificationDispatcher::new(Some(Arc::new(ChannelNotifier(tx))));
        let fx = Fixture::new(dispatcher);
        let event = fx.event(1, true).await;
        fx.user("a@example.com", Some(7_000_001)).await;

        let receipt = fx.service.book_event(event.id, "a@example.com").await.unwrap();
        let (chat, text) = tokio::time::timeout(StdDuration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(chat, 7_000_001);
        assert!(text.starts_with("Seat reserved"));

        fx.service.confirm_booking(event.id, receipt.booking_id).await.unwrap();
        let (_, text) = tokio::time::timeout(StdDuration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(text.contains("is confirmed"));
    }
}
