//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use booker_core::config::DatabaseConfig;
use booker_core::traits::{Clock, ManualClock};
use booker_database::{DatabasePool, Stores};
use booker_entity::event::{CreateEvent, Event};
use booker_entity::user::{CreateUser, User};

/// Stores over the database named by `DATABASE_URL`, with migrations applied.
pub struct TestDb {
    pub stores: Stores,
    pub clock: ManualClock,
}

impl TestDb {
    /// Connect and migrate. The clock starts at the current wall time.
    pub async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = DatabaseConfig {
            url,
            max_connections: 30,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 60,
        };
        let pool = DatabasePool::connect(&config)
            .await
            .expect("Failed to connect to test database");

        let clock = ManualClock::new(Utc::now());
        let stores = Stores::postgres(pool, Arc::new(clock.clone()));
        stores.migrate().await.expect("Failed to run migrations");

        Self { stores, clock }
    }

    /// Current instant of the test clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create an event a month out.
    pub async fn event(&self, total_seats: i32, lifetime_minutes: i32, payment: bool) -> Event {
        let event = Event::new(
            CreateEvent {
                name: format!("Integration {}", Uuid::new_v4()),
                date: self.now() + Duration::days(30),
                total_seats,
                booking_lifetime: lifetime_minutes,
                requires_payment_confirmation: payment,
            },
            self.now(),
        );
        self.stores
            .inventory
            .create_event(&event)
            .await
            .expect("Failed to create event")
    }

    /// Register a user with a unique email.
    pub async fn user(&self) -> User {
        let user = User::new(
            CreateUser {
                name: "Integration User".to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                telegram_id: None,
            },
            self.now(),
        );
        self.stores
            .users
            .create_user(&user)
            .await
            .expect("Failed to create user")
    }

    /// Reload an event.
    pub async fn reload(&self, event_id: Uuid) -> Event {
        self.stores
            .inventory
            .find_event(event_id)
            .await
            .expect("Failed to load event")
            .expect("event exists")
    }
}
