//! # Domain Models
//!
//! Per-run values produced by the fetchers and consumed by the brief builder.
//! Nothing here outlives a single run.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Asset`] | Ticker, provider id and comparison levels |
//! | [`PricePoint`] | Spot price and 24h change, each optional |
//! | [`DailyBar`] | Latest daily OHLC interval |
//! | [`MarketSnapshot`] | Market-cap inputs for dominance and TOTAL2 |
//! | [`SentimentReading`] | Sentiment index on a 0..=100 scale |
//! | [`Headline`] | News headline text |

mod models;
mod symbol;
mod timestamp;

pub use models::{
    Asset, ComparisonLevel, DailyBar, Headline, MarketSnapshot, PricePoint, PriceTable,
    SentimentReading,
};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
