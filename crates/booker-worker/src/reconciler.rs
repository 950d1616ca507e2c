//! One pass of expired reservation reconciliation.
//!
//! Each booking is cancelled in its own transaction. The batch is not
//! atomic: a pass cut short by shutdown or a crash leaves the remainder for
//! the next pass, which is safe because cancelling an already-cancelled or
//! confirmed booking is rejected without touching seat counters.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use booker_core::error::BookingError;
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_database::store::{BookingEngine, InventoryStore, UserDirectory};
use booker_entity::booking::Booking;
use booker_notify::{DeliveryOutcome, NotificationDispatcher, NotificationFormatter};

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Reservations past their deadline when the sweep started.
    pub found: usize,
    /// Reservations this sweep cancelled.
    pub cancelled: usize,
    /// Reservations that had already left the reserved state.
    pub skipped: usize,
    /// Reservations whose cancellation failed.
    pub failed: usize,
    /// Cancellation notices delivered.
    pub notified: usize,
}

/// How one expired booking was handled.
enum Handled {
    Cancelled { notified: bool },
    Skipped,
}

/// Finds reservations past their deadline and cancels them.
#[derive(Clone)]
pub struct ExpiryReconciler {
    inventory: Arc<dyn InventoryStore>,
    engine: Arc<dyn BookingEngine>,
    users: Arc<dyn UserDirectory>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl ExpiryReconciler {
    /// Create a reconciler.
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

    /// Run one sweep, stopping early between bookings once `shutdown`
    /// reads `true`.
    ///
    /// Only the initial query can fail the sweep; per-booking failures are
    /// logged and counted.
    pub async fn sweep(&self, shutdown: &watch::Receiver<bool>) -> AppResult<SweepReport> {
        let expired = self
            .inventory
            .expired_reservations(self.clock.now())
            .await?;

        let mut report = SweepReport {
            found: expired.len(),
            ..SweepReport::default()
        };
        if expired.is_empty() {
            debug!("No expired reservations");
            return Ok(report);
        }
        info!(count = expired.len(), "Processing expired reservations");

        for booking in &expired {
            if *shutdown.borrow() {
                info!(
                    remaining = report.found - report.cancelled - report.skipped - report.failed,
                    "Shutdown requested, leaving remaining reservations for the next sweep"
                );
                break;
            }

            match self.reconcile(booking).await {
                Ok(Handled::Cancelled { notified }) => {
                    report.cancelled += 1;
                    report.notified += usize::from(notified);
                }
                Ok(Handled::Skipped) => report.skipped += 1,
                Err(e) => {
                    report.failed += 1;
                    error!(booking_id = %booking.id, error = %e, "Failed to cancel expired reservation");
                }
            }
        }

        info!(
            found = report.found,
            cancelled = report.cancelled,
            skipped = report.skipped,
            failed = report.failed,
            notified = report.notified,
            "Expiry sweep finished"
        );
        Ok(report)
    }

    async fn reconcile(&self, expired: &Booking) -> AppResult<Handled> {
        let current = match self.inventory.find_booking(expired.id).await? {
            Some(b) if b.is_reserved() => b,
            Some(b) => {
                info!(booking_id = %b.id, status = %b.status, "Booking no longer reserved, skipping");
                return Ok(Handled::Skipped);
            }
            None => {
                debug!(booking_id = %expired.id, "Booking disappeared, skipping");
                return Ok(Handled::Skipped);
            }
        };

        match self.engine.cancel_expired_booking(current.id).await {
            Ok(()) => {}
            Err(e) if e.is_booking(BookingError::BookingNotReserved) => {
                info!(booking_id = %current.id, "Booking left reserved state before cancellation, skipping");
                return Ok(Handled::Skipped);
            }
            Err(e) => return Err(e),
        }
        info!(booking_id = %current.id, event_id = %current.event_id, deadline = %current.deadline, "Cancelled expired reservation");

        let notified = self.notify_cancelled(&current).await;
        Ok(Handled::Cancelled { notified })
    }

    /// Tell the user their reservation was released. Never fails the sweep.
    async fn notify_cancelled(&self, booking: &Booking) -> bool {
        if !self.dispatcher.is_enabled() {
            return false;
        }

        let user = match self.users.find_user_by_id(booking.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(booking_id = %booking.id, user_id = %booking.user_id, "User not found for cancellation notice");
                return false;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Failed to load user for cancellation notice");
                return false;
            }
        };
        let event = match self.inventory.find_event(booking.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => {
                warn!(booking_id = %booking.id, event_id = %booking.event_id, "Event not found for cancellation notice");
                return false;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Failed to load event for cancellation notice");
                return false;
            }
        };

        let message = NotificationFormatter::reservation_cancelled(&event, booking);
        self.dispatcher.notify_user(&user, &message).await == DeliveryOutcome::Sent
    }
}

impl std::fmt::Debug for ExpiryReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiryReconciler")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
