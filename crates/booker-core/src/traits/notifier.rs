//! Outbound user notification trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Delivers a plain-text message to a user's chat.
///
/// Delivery is best-effort: callers log failures and carry on, so a
/// returned error never changes booking state.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send `message` to `chat_id` on behalf of `user_id`.
    async fn notify(&self, user_id: Uuid, chat_id: i64, message: &str) -> AppResult<()>;
}
