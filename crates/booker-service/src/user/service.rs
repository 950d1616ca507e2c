//! User registration and identity lookup.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use booker_core::error::{AppError, BookingError};
use booker_core::result::AppResult;
use booker_core::traits::Clock;
use booker_database::store::UserDirectory;
use booker_entity::user::{CreateUser, User};

/// Handles user registration and lookup.
#[derive(Clone)]
pub struct UserService {
    /// User storage.
    users: Arc<dyn UserDirectory>,
    /// Time source for `created_at`.
    clock: Arc<dyn Clock>,
}

/// Canonical form an email is stored and looked up under.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Register a user. Duplicate email or telegram id is a conflict.
    pub async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let name = input.name.trim().to_string();
        let email = normalize_email(&input.email);
        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        if email.is_empty() {
            return Err(AppError::validation("email is required"));
        }

        let user = User::new(
            CreateUser {
                name,
                email,
                telegram_id: input.telegram_id,
            },
            self.clock.now(),
        );
        let user = self.users.create_user(&user).await?;

        info!(user_id = %user.id, has_telegram = user.telegram_id.is_some(), "User registered");
        Ok(user)
    }

    /// Look a user up by email.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| BookingError::UserNotFound.into())
    }

    /// Look a user up by id.
    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| BookingError::UserNotFound.into())
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
