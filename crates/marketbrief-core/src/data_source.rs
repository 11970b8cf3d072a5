//! Source traits consumed by the brief builder.
//!
//! Mandatory lookups return `Result`: a non-2xx status degrades to an empty
//! value, while a transport failure is an error that aborts the run. Optional
//! lookups return `Option`/`Vec` and never fail.
//!
//! | Trait | Lookup | Failure surface |
//! |-------|--------|-----------------|
//! | [`MarketDataSource`] | bulk prices, total market cap | `Result<_, FetchError>` |
//! | [`MarketDataSource`] | market cap, last daily bar | `Option` |
//! | [`SentimentSource`] | sentiment index | `Option` |
//! | [`NewsSource`] | headlines | possibly empty `Vec` |

use std::future::Future;
use std::pin::Pin;

use crate::{DailyBar, FetchError, Headline, PriceTable, SentimentReading};

/// Boxed future returned by source trait methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Price, market-cap and OHLC provider.
pub trait MarketDataSource: Send + Sync {
    /// Spot price and 24h change for each id. Ids the provider omits are
    /// missing from the table.
    fn simple_prices<'a>(
        &'a self,
        ids: &'a [String],
    ) -> SourceFuture<'a, Result<PriceTable, FetchError>>;

    /// Total market capitalization in USD.
    fn total_market_cap<'a>(&'a self) -> SourceFuture<'a, Result<Option<f64>, FetchError>>;

    /// Market capitalization of one asset in USD.
    fn market_cap<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<f64>>;

    /// Most recent daily bar of one asset.
    fn last_daily_bar<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<DailyBar>>;
}

/// Sentiment index provider.
pub trait SentimentSource: Send + Sync {
    fn sentiment<'a>(&'a self) -> SourceFuture<'a, Option<SentimentReading>>;
}

/// News headline provider.
pub trait NewsSource: Send + Sync {
    fn headlines<'a>(&'a self) -> SourceFuture<'a, Vec<Headline>>;
}
