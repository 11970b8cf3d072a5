use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::data_source::{SentimentSource, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::SentimentReading;

const PROVIDER: &str = "alternative.me";
const TIMEOUT_MS: u64 = 20_000;

/// Crypto Fear & Greed index adapter.
#[derive(Clone)]
pub struct FearGreedAdapter {
    http_client: Arc<dyn HttpClient>,
    url: String,
}

impl FearGreedAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    async fn fetch_latest(&self) -> Option<SentimentReading> {
        let request = HttpRequest::get(&self.url)
            .with_query("limit", "1")
            .with_query("format", "json")
            .with_timeout_ms(TIMEOUT_MS);
        debug!("{PROVIDER} request: {}", request.full_url());

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!("{PROVIDER} transport error: {}", error.message());
                return None;
            }
        };

        if !response.is_success() {
            warn!("{PROVIDER} returned status {}", response.status);
            return None;
        }

        let reading = parse_latest(&response.body);
        if reading.is_none() {
            warn!("{PROVIDER} response has no usable index value");
        }
        reading
    }
}

impl SentimentSource for FearGreedAdapter {
    fn sentiment<'a>(&'a self) -> SourceFuture<'a, Option<SentimentReading>> {
        Box::pin(self.fetch_latest())
    }
}

/// The index value arrives as a numeric string; plain numbers are accepted too.
fn parse_latest(body: &str) -> Option<SentimentReading> {
    let response: FearGreedResponse = serde_json::from_str(body).ok()?;
    let value = match response.data.first()?.value.as_ref()? {
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        Value::Number(number) => number.as_i64()?,
        _ => return None,
    };
    SentimentReading::new(value)
}

#[derive(Debug, Clone, Deserialize)]
struct FearGreedResponse {
    #[serde(default)]
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct FearGreedEntry {
    #[serde(default)]
    value: Option<Value>,
}
