use crate::config::Config;
use crate::errors::AppError;
use serde_json::json;
use std::time::Duration;

/// Client for the operator's Telegram bot.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Telegram client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.telegram_base_url.clone(),
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    /// Sends a plain-text message to the configured chat.
    ///
    /// Any non-2xx answer is an error; the caller decides what that means
    /// for the surrounding operation.
    pub async fn send_message(&self, text: &str) -> Result<(), AppError> {
        let bot_token = self
            .bot_token
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured("TELEGRAM_BOT_TOKEN is not set".to_string()))?;
        let chat_id = self
            .chat_id
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured("TELEGRAM_CHAT_ID is not set".to_string()))?;

        let url = format!("{}/bot{}/sendMessage", self.base_url, bot_token);
        // Redact token from logs to prevent credential exposure
        tracing::debug!(
            "Telegram URL: {}/bot[REDACTED]/sendMessage chat_id={}",
            self.base_url,
            chat_id
        );

        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::NotificationFailed(format!(
                    "Failed to send Telegram message: {}",
                    e.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::NotificationFailed(format!(
                "Failed to send Telegram message ({}): {}",
                status, error_text
            )));
        }

        tracing::info!("✓ Telegram message sent to chat {}", chat_id);
        Ok(())
    }
}
