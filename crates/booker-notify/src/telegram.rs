//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use booker_core::config::TelegramConfig;
use booker_core::error::{AppError, ErrorKind};
use booker_core::result::AppResult;
use booker_core::traits::Notifier;

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Envelope every Bot API response carries.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through a Telegram bot.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl TelegramNotifier {
    /// Build a notifier when a bot token is configured.
    pub fn from_config(config: &TelegramConfig) -> AppResult<Option<Self>> {
        let Some(token) = config.token() else {
            return Ok(None);
        };
        Self::new(
            &config.api_base_url,
            token,
            Duration::from_secs(config.timeout_seconds),
        )
        .map(Some)
    }

    /// Build a notifier posting to `{api_base_url}/bot{token}/sendMessage`.
    pub fn new(api_base_url: &str, token: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{token}/sendMessage", api_base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, user_id: Uuid, chat_id: i64, message: &str) -> AppResult<()> {
        info!(user_id = %user_id, chat_id, "Sending Telegram notification");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendMessage {
                chat_id,
                text: message,
            })
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Telegram request failed", e)
            })?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse {
                description: Some(description),
                ..
            }) => Err(AppError::external_service(format!(
                "Telegram API error: {description}"
            ))),
            _ => Err(AppError::external_service(format!(
                "Telegram API error: status {}",
                status.as_u16()
            ))),
        }
    }
}
