//! Booking engine transactions against PostgreSQL.

use chrono::Duration;
use futures::future::join_all;
use uuid::Uuid;

use booker_core::error::BookingError;
use booker_entity::booking::BookingStatus;

use crate::helpers::TestDb;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_reservations_never_oversell() {
    let db = TestDb::new().await;
    let event = db.event(3, 30, true).await;

    let mut users = Vec::new();
    for _ in 0..20 {
        users.push(db.user().await);
    }

    let attempts = users
        .iter()
        .map(|u| db.stores.engine.create_booking(event.id, u.id));
    let results = join_all(attempts).await;

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_booking(BookingError::NoAvailableSeats)))
        .count();
    assert_eq!(admitted, 3);
    assert_eq!(full, 17);

    let event = db.reload(event.id).await;
    assert_eq!(event.reserved_seats, 3);
    assert_eq!(event.booked_seats, 0);
    assert_eq!(event.available_seats(), 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_claims_by_one_user() {
    let db = TestDb::new().await;
    let event = db.event(10, 30, true).await;
    let user = db.user().await;

    let attempts = (0..8).map(|_| db.stores.engine.create_booking(event.id, user.id));
    let results = join_all(attempts).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
        r,
        Err(e) if e.is_booking(BookingError::UserAlreadyBookedThisEvent)
    )));
    assert_eq!(db.reload(event.id).await.reserved_seats, 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_confirm_moves_seat_to_booked() {
    let db = TestDb::new().await;
    let event = db.event(2, 30, true).await;
    let user = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, user.id)
        .await
        .expect("reserve");
    assert_eq!(booking.status, BookingStatus::Reserved);

    db.stores
        .engine
        .confirm_booking(booking.id)
        .await
        .expect("confirm");

    let event = db.reload(event.id).await;
    assert_eq!(event.reserved_seats, 0);
    assert_eq!(event.booked_seats, 1);

    let stored = db
        .stores
        .inventory
        .find_booking(booking.id)
        .await
        .expect("load")
        .expect("exists");
    assert_eq!(stored.status, BookingStatus::Confirmed);

    let again = db.stores.engine.confirm_booking(booking.id).await;
    assert!(matches!(again, Err(e) if e.is_booking(BookingError::BookingNotReserved)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_confirm_after_deadline_changes_nothing() {
    let db = TestDb::new().await;
    let event = db.event(1, 5, true).await;
    let user = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, user.id)
        .await
        .expect("reserve");

    db.clock.advance(Duration::minutes(6));
    let result = db.stores.engine.confirm_booking(booking.id).await;
    assert!(matches!(result, Err(e) if e.is_booking(BookingError::BookingDeadlinePassed)));

    let event = db.reload(event.id).await;
    assert_eq!(event.reserved_seats, 1);
    assert_eq!(event.booked_seats, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_direct_booking_takes_booked_seat() {
    let db = TestDb::new().await;
    let event = db.event(1, 0, false).await;
    let user = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, user.id)
        .await
        .expect("book");
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let event = db.reload(event.id).await;
    assert_eq!(event.booked_seats, 1);
    assert_eq!(event.reserved_seats, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_rows_are_named() {
    let db = TestDb::new().await;
    let event = db.event(1, 30, true).await;

    let no_event = db.stores.engine.create_booking(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(no_event, Err(e) if e.is_booking(BookingError::EventNotFound)));

    let no_user = db.stores.engine.create_booking(event.id, Uuid::new_v4()).await;
    assert!(matches!(no_user, Err(e) if e.is_booking(BookingError::UserNotFound)));
    assert_eq!(db.reload(event.id).await.reserved_seats, 0);

    let no_booking = db.stores.engine.confirm_booking(Uuid::new_v4()).await;
    assert!(matches!(no_booking, Err(e) if e.is_booking(BookingError::BookingNotFound)));
}
