//! Values derived from fetched data: dominance, TOTAL2, the upper-wick flag
//! and sentiment bands.

use crate::{DailyBar, MarketSnapshot, SentimentReading};

/// Upper wick must exceed this share of the close.
const WICK_MIN_CLOSE_RATIO: f64 = 0.015;
/// Upper wick must exceed this multiple of the candle body.
const WICK_BODY_MULTIPLE: f64 = 1.5;

const SENTIMENT_HIGH_RISK_ABOVE: u8 = 65;
const SENTIMENT_NEUTRAL_FROM: u8 = 40;

/// Share of `asset_cap` in `total_cap`, in percent rounded to 2 decimals.
///
/// Missing or zero inputs yield `None`.
pub fn dominance(asset_cap: Option<f64>, total_cap: Option<f64>) -> Option<f64> {
    let asset_cap = present(asset_cap)?;
    let total_cap = present(total_cap)?;
    Some((100.0 * asset_cap / total_cap * 100.0).round() / 100.0)
}

/// Total market cap excluding one asset (TOTAL2 when the asset is BTC).
pub fn total_excluding(total_cap: Option<f64>, asset_cap: Option<f64>) -> Option<f64> {
    Some(present(total_cap)? - present(asset_cap)?)
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

impl MarketSnapshot {
    pub fn stablecoin_dominance(&self) -> Option<f64> {
        dominance(self.stablecoin_market_cap, self.total_market_cap)
    }

    pub fn total_excluding_reference(&self) -> Option<f64> {
        total_excluding(self.total_market_cap, self.reference_market_cap)
    }
}

/// Long upper shadow on a daily candle, a possible exhaustion signal.
pub fn has_upper_wick(bar: &DailyBar) -> bool {
    let DailyBar {
        open, high, close, ..
    } = *bar;
    if ![open, high, close].iter().all(|v| v.is_finite()) {
        return false;
    }

    let body = (close - open).abs();
    let upper = high - open.max(close);
    upper > WICK_MIN_CLOSE_RATIO * close && (body == 0.0 || upper > WICK_BODY_MULTIPLE * body)
}

/// Risk band of a sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentBand {
    HighRisk,
    Neutral,
    LowRisk,
    Unknown,
}

impl SentimentBand {
    pub fn classify(reading: Option<SentimentReading>) -> Self {
        match reading.map(SentimentReading::value) {
            None => Self::Unknown,
            Some(v) if v > SENTIMENT_HIGH_RISK_ABOVE => Self::HighRisk,
            Some(v) if v >= SENTIMENT_NEUTRAL_FROM => Self::Neutral,
            Some(_) => Self::LowRisk,
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::HighRisk => "🔴",
            Self::Neutral => "🟡",
            Self::LowRisk => "🟢",
            Self::Unknown => "⚪️",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighRisk => "high-risk",
            Self::Neutral => "neutral",
            Self::LowRisk => "low-risk",
            Self::Unknown => "unknown",
        }
    }
}
