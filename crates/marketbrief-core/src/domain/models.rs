use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Symbol, UtcDateTime, ValidationError};

/// Static reference price shown next to the live price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLevel {
    pub label: String,
    pub price: f64,
}

impl ComparisonLevel {
    pub fn new(label: impl Into<String>, price: f64) -> Result<Self, ValidationError> {
        let label = label.into();
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidLevel { label });
        }

        Ok(Self { label, price })
    }
}

/// Tracked asset with its provider mapping and comparison levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: Symbol,
    pub provider_id: Option<String>,
    pub levels: Vec<ComparisonLevel>,
}

impl Asset {
    pub fn new(symbol: Symbol, provider_id: Option<&str>) -> Self {
        Self {
            symbol,
            provider_id: provider_id.map(str::to_owned),
            levels: Vec::new(),
        }
    }

    pub fn with_levels(mut self, levels: Vec<ComparisonLevel>) -> Self {
        self.levels = levels;
        self
    }
}

/// Spot price and 24h change for one asset. Either field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
}

impl PricePoint {
    pub const fn new(price: Option<f64>, change_24h: Option<f64>) -> Self {
        Self { price, change_24h }
    }
}

/// Provider identifier to price point, as returned by the bulk lookup.
pub type PriceTable = BTreeMap<String, PricePoint>;

/// Most recent daily OHLC interval of an asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DailyBar {
    /// Decodes a `[t_ms, open, high, low, close]` row.
    ///
    /// Returns `None` for the wrong arity or any non-numeric or non-finite cell.
    pub fn from_row(row: &[Value]) -> Option<Self> {
        let [ts, open, high, low, close] = row else {
            return None;
        };

        let ts = UtcDateTime::from_unix_millis(ts.as_i64().or_else(|| {
            ts.as_f64()
                .filter(|value| value.is_finite())
                .map(|value| value as i64)
        })?)?;
        let finite = |value: &Value| value.as_f64().filter(|v| v.is_finite());

        Some(Self {
            ts,
            open: finite(open)?,
            high: finite(high)?,
            low: finite(low)?,
            close: finite(close)?,
        })
    }
}

/// Aggregate market capitalization inputs for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketSnapshot {
    pub total_market_cap: Option<f64>,
    pub reference_market_cap: Option<f64>,
    pub stablecoin_market_cap: Option<f64>,
}

/// Sentiment index value, clamped to the 0..=100 scale by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SentimentReading(u8);

impl SentimentReading {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|value| *value <= Self::MAX)
            .map(Self)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// One news headline taken from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline(String);

impl Headline {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
