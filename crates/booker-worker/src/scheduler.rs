//! Periodic reconciler task with an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use booker_core::config::ReconcilerConfig;

use crate::reconciler::ExpiryReconciler;

/// Owns the background task that runs the reconciler on a fixed interval.
pub struct ReconcilerScheduler {
    /// Shutdown signal observed by the loop and by each sweep.
    shutdown: watch::Sender<bool>,
    /// The loop task.
    handle: JoinHandle<()>,
}

impl std::fmt::Debug for ReconcilerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcilerScheduler")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

impl ReconcilerScheduler {
    /// Spawn the loop. The first sweep runs immediately when
    /// `config.run_on_start` is set, otherwise after one interval.
    pub fn start(reconciler: Arc<ExpiryReconciler>, config: &ReconcilerConfig) -> Self {
        let (shutdown, cancel) = watch::channel(false);
        let period = config.interval();
        let first_tick = if config.run_on_start {
            Instant::now()
        } else {
            Instant::now() + period
        };

        info!(interval_seconds = period.as_secs(), "Starting expiry reconciler");
        let handle = tokio::spawn(run_loop(reconciler, first_tick, period, cancel));
        Self { shutdown, handle }
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop to stop and wait up to `grace` for an in-flight sweep
    /// to finish its current booking. The task is aborted after that.
    pub async fn stop(self, grace: Duration) {
        let Self { shutdown, mut handle } = self;
        let _ = shutdown.send(true);

        match time::timeout(grace, &mut handle).await {
            Ok(Ok(())) => info!("Expiry reconciler stopped"),
            Ok(Err(e)) => error!(error = %e, "Expiry reconciler task failed"),
            Err(_) => {
                warn!(grace_seconds = grace.as_secs(), "Expiry reconciler did not stop in time, aborting");
                handle.abort();
            }
        }
    }
}

async fn run_loop(
    reconciler: Arc<ExpiryReconciler>,
    first_tick: Instant,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
) {
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = reconciler.sweep(&cancel).await {
                    error!(error = %e, "Expiry sweep failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};

    use booker_core::traits::{Clock, ManualClock};
    use booker_database::store::{BookingEngine, InventoryStore, UserDirectory};
    use booker_database::MemoryStore;
    use booker_entity::booking::BookingStatus;
    use booker_entity::event::{CreateEvent, Event};
    use booker_entity::user::{CreateUser, User};
    use booker_notify::NotificationDispatcher;

    use super::*;

    fn config(run_on_start: bool) -> ReconcilerConfig {
        ReconcilerConfig {
            enabled: true,
            interval_seconds: 60,
            run_on_start,
        }
    }

    async fn setup() -> (Arc<ExpiryReconciler>, MemoryStore, uuid::Uuid) {
        let clock = ManualClock::new(Utc::now());
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let store = MemoryStore::new(shared.clone());

        let event = Event::new(
            CreateEvent {
                name: "Opera".into(),
                date: clock.now() + ChronoDuration::days(1),
                total_seats: 1,
                booking_lifetime: 5,
                requires_payment_confirmation: true,
            },
            clock.now(),
        );
        store.create_event(&event).await.unwrap();
        let user = User::new(
            CreateUser {
                name: "Eve".into(),
                email: "eve@example.com".into(),
                telegram_id: None,
            },
            clock.now(),
        );
        store.create_user(&user).await.unwrap();
        let booking = store.create_booking(event.id, user.id).await.unwrap();
        clock.advance(ChronoDuration::minutes(6));

        let reconciler = Arc::new(ExpiryReconciler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            NotificationDispatcher::disabled(),
            shared,
        ));
        (reconciler, store, booking.id)
    }

    async fn status(store: &MemoryStore, id: uuid::Uuid) -> BookingStatus {
        store.find_booking(id).await.unwrap().unwrap().status
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_on_start_and_stops() {
        let (reconciler, store, booking_id) = setup().await;
        let scheduler = ReconcilerScheduler::start(reconciler, &config(true));

        for _ in 0..50 {
            if status(&store, booking_id).await == BookingStatus::Cancelled {
                break;
            }
            time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(status(&store, booking_id).await, BookingStatus::Cancelled);

        scheduler.stop(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_one_interval_when_not_running_on_start() {
        let (reconciler, store, booking_id) = setup().await;
        let scheduler = ReconcilerScheduler::start(reconciler, &config(false));

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(status(&store, booking_id).await, BookingStatus::Reserved);

        time::sleep(Duration::from_secs(31)).await;
        assert_eq!(status(&store, booking_id).await, BookingStatus::Cancelled);

        assert!(!scheduler.is_finished());
        scheduler.stop(Duration::from_secs(1)).await;
    }
}
