//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user who can book seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Telegram chat id used for notifications (unique when present).
    pub telegram_id: Option<i64>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user row from registration input.
    pub fn new(input: CreateUser, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            telegram_id: input.telegram_id,
            created_at: now,
        }
    }

    /// The chat to notify, if the user registered one.
    pub fn notification_address(&self) -> Option<i64> {
        self.telegram_id
    }
}

/// Data required to register a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional Telegram chat id.
    pub telegram_id: Option<i64>,
}
