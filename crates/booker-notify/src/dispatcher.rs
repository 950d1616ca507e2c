//! Notification dispatcher over an optional notifier.

use std::sync::Arc;

use tracing::{debug, warn};

use booker_core::traits::Notifier;
use booker_entity::user::User;

/// What happened to one notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The notifier accepted the message.
    Sent,
    /// Notifications are disabled or the user has no chat.
    Skipped,
    /// The notifier failed; the failure was logged.
    Failed,
}

/// Sends user notifications when a notifier is configured.
///
/// Delivery never fails the caller: errors are logged at `warn` and
/// reported as [`DeliveryOutcome::Failed`].
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    notifier: Option<Arc<dyn Notifier>>,
}

impl NotificationDispatcher {
    /// Create a dispatcher; `None` disables delivery.
    pub fn new(notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { notifier }
    }

    /// A dispatcher that never sends anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether a notifier is configured.
    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Deliver `message` to `user`'s registered chat.
    pub async fn notify_user(&self, user: &User, message: &str) -> DeliveryOutcome {
        let Some(notifier) = &self.notifier else {
            return DeliveryOutcome::Skipped;
        };
        let Some(chat_id) = user.notification_address() else {
            debug!(user_id = %user.id, "User has no notification address, skipping");
            return DeliveryOutcome::Skipped;
        };

        match notifier.notify(user.id, chat_id, message).await {
            Ok(()) => DeliveryOutcome::Sent,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Failed to deliver notification");
                DeliveryOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
