//! Sends the finished brief through the Telegram Bot API.

use std::sync::Arc;

use log::{info, warn};
use secrecy::ExposeSecret;

use crate::config::DeliveryConfig;
use crate::http_client::{HttpClient, HttpRequest};
use crate::{DeliveryError, Report};

const TIMEOUT_MS: u64 = 30_000;
const PARSE_MODE: &str = "Markdown";

/// Status and body of the messaging API response, reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: String,
}

impl DeliveryReceipt {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// One-shot Telegram `sendMessage` client. Never retries.
pub struct TelegramNotifier {
    http_client: Arc<dyn HttpClient>,
    api_base: String,
    config: DeliveryConfig,
}

impl TelegramNotifier {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        api_base: impl Into<String>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            http_client,
            api_base: api_base.into(),
            config,
        }
    }

    /// Posts the report once. A non-2xx answer is a receipt, not an error.
    pub async fn send(&self, report: &Report) -> Result<DeliveryReceipt, DeliveryError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.config.bot_token.expose_secret()
        );
        let request = HttpRequest::post(url)
            .with_form(&[
                ("chat_id", self.config.chat_id.as_str()),
                ("text", report.as_str()),
                ("parse_mode", PARSE_MODE),
            ])
            .with_timeout_ms(TIMEOUT_MS);

        info!(
            "sending brief ({} chars) to chat {}",
            report.as_str().chars().count(),
            self.config.chat_id
        );
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| DeliveryError {
                message: error.message().to_owned(),
            })?;

        let receipt = DeliveryReceipt {
            status: response.status,
            body: response.body,
        };
        if !receipt.is_success() {
            warn!("messaging API rejected the brief with status {}", receipt.status);
        }
        Ok(receipt)
    }
}
