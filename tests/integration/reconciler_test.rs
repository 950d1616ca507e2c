//! Expiry reconciliation against PostgreSQL.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;

use booker_entity::booking::BookingStatus;
use booker_notify::NotificationDispatcher;
use booker_worker::ExpiryReconciler;

use crate::helpers::TestDb;

fn reconciler(db: &TestDb) -> ExpiryReconciler {
    ExpiryReconciler::new(
        Arc::clone(&db.stores.inventory),
        Arc::clone(&db.stores.engine),
        Arc::clone(&db.stores.users),
        NotificationDispatcher::disabled(),
        Arc::new(db.clock.clone()),
    )
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_sweep_releases_expired_seat() {
    let db = TestDb::new().await;
    let event = db.event(1, 10, true).await;
    let holder = db.user().await;
    let waiting = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, holder.id)
        .await
        .expect("reserve");

    db.clock.advance(Duration::minutes(11));
    let (_shutdown, running) = watch::channel(false);
    let report = reconciler(&db).sweep(&running).await.expect("sweep");
    assert!(report.cancelled >= 1);

    let stored = db
        .stores
        .inventory
        .find_booking(booking.id)
        .await
        .expect("load")
        .expect("exists");
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(db.reload(event.id).await.reserved_seats, 0);

    let next = db.stores.engine.create_booking(event.id, waiting.id).await;
    assert!(next.is_ok());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unexpired_reservation_is_left_alone() {
    let db = TestDb::new().await;
    let event = db.event(1, 10, true).await;
    let user = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, user.id)
        .await
        .expect("reserve");

    let (_shutdown, running) = watch::channel(false);
    reconciler(&db).sweep(&running).await.expect("sweep");

    let stored = db
        .stores
        .inventory
        .find_booking(booking.id)
        .await
        .expect("load")
        .expect("exists");
    assert_eq!(stored.status, BookingStatus::Reserved);
    assert_eq!(db.reload(event.id).await.reserved_seats, 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_cancel_is_rejected_once_confirmed() {
    let db = TestDb::new().await;
    let event = db.event(1, 10, true).await;
    let user = db.user().await;

    let booking = db
        .stores
        .engine
        .create_booking(event.id, user.id)
        .await
        .expect("reserve");
    db.stores
        .engine
        .confirm_booking(booking.id)
        .await
        .expect("confirm");

    let result = db.stores.engine.cancel_expired_booking(booking.id).await;
    assert!(result.is_err());

    let event = db.reload(event.id).await;
    assert_eq!(event.booked_seats, 1);
    assert_eq!(event.reserved_seats, 0);
}
