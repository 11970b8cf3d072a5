//! # marketbrief core
//!
//! Fetches market data, sentiment and headlines, renders a five-section
//! market brief and delivers it to a Telegram chat.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | CoinGecko, Fear & Greed and RSS adapters |
//! | [`brief`] | Input collection and report rendering |
//! | [`config`] | Environment-driven settings |
//! | [`data_source`] | Source traits consumed by the builder |
//! | [`delivery`] | Telegram `sendMessage` client |
//! | [`domain`] | Per-run domain values |
//! | [`error`] | Error types |
//! | [`format`] | Number and marker formatting |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`metrics`] | Dominance, TOTAL2, wick heuristic, sentiment bands |
//! | [`reference`] | Static asset tables |
//!
//! ## Flow
//!
//! ```text
//! ReferenceData ──▶ BriefBuilder::collect ──▶ render ──▶ TelegramNotifier::send
//!                        │
//!                        ├─ MarketDataSource (prices, totals, caps, daily bars)
//!                        ├─ SentimentSource
//!                        └─ NewsSource
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marketbrief_core::*;
//!
//! let settings = Settings::from_env()?;
//! let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
//! let market = CoinGeckoAdapter::new(http.clone(), &settings.endpoints.coingecko);
//! let sentiment = FearGreedAdapter::new(http.clone(), &settings.endpoints.sentiment);
//! let news = RssNewsAdapter::new(
//!     http.clone(),
//!     &settings.endpoints.news_feed,
//!     &settings.endpoints.news_publisher,
//! );
//! let reference = ReferenceData::builtin()?;
//!
//! let report = BriefBuilder::new(&reference, &market, &sentiment, &news).build().await?;
//! let receipt = TelegramNotifier::new(http, &settings.endpoints.telegram, settings.delivery)
//!     .send(&report)
//!     .await?;
//! println!("Telegram: {} {}", receipt.status, receipt.body);
//! ```

pub mod adapters;
pub mod brief;
pub mod config;
pub mod data_source;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod metrics;
pub mod reference;

pub use adapters::{CoinGeckoAdapter, FearGreedAdapter, RssNewsAdapter};

pub use brief::{render, BriefBuilder, BriefInputs, Report};

pub use config::{DeliveryConfig, Endpoints, Settings};

pub use data_source::{MarketDataSource, NewsSource, SentimentSource, SourceFuture};

pub use delivery::{DeliveryReceipt, TelegramNotifier};

pub use domain::{
    Asset, ComparisonLevel, DailyBar, Headline, MarketSnapshot, PricePoint, PriceTable,
    SentimentReading, Symbol, UtcDateTime,
};

pub use error::{ConfigError, DeliveryError, FetchError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use metrics::SentimentBand;

pub use reference::ReferenceData;
