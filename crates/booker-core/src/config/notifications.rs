//! Outbound notification configuration.

use serde::{Deserialize, Serialize};

/// Notification channels. A channel without credentials is disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Telegram Bot API channel.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token. Notifications are disabled when absent or empty.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Base URL of the Bot API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl TelegramConfig {
    /// The configured token, if it is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.bot_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    30
}
