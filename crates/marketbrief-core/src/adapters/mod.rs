//! Provider adapters behind the [`crate::data_source`] traits.

mod coingecko;
mod fear_greed;
mod rss;

pub use coingecko::CoinGeckoAdapter;
pub use fear_greed::FearGreedAdapter;
pub use rss::{extract_headlines, RssNewsAdapter, MAX_HEADLINES};
