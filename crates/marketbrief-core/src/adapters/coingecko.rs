use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::data_source::{MarketDataSource, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::{DailyBar, FetchError, PricePoint, PriceTable};

const PROVIDER: &str = "coingecko";
const TIMEOUT_MS: u64 = 40_000;
const VS_CURRENCY: &str = "usd";

/// CoinGecko public API adapter (prices, global totals, coin detail, OHLC).
#[derive(Clone)]
pub struct CoinGeckoAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CoinGeckoAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Transport errors surface; status is left to the caller.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        debug!("{PROVIDER} request: {}", request.full_url());
        let timeout_ms = request.timeout_ms;
        self.http_client.execute(request).await.map_err(|error| {
            if error.is_timeout() {
                FetchError::transport(
                    PROVIDER,
                    format!("{} (limit {timeout_ms} ms)", error.message()),
                )
            } else {
                FetchError::transport(PROVIDER, error.message())
            }
        })
    }

    async fn fetch_simple_prices(&self, ids: &[String]) -> Result<PriceTable, FetchError> {
        if ids.is_empty() {
            return Ok(PriceTable::new());
        }

        let request = HttpRequest::get(self.endpoint("simple/price"))
            .with_query("ids", ids.join(","))
            .with_query("vs_currencies", VS_CURRENCY)
            .with_query("include_24hr_change", "true")
            .with_timeout_ms(TIMEOUT_MS);
        let response = self.execute(request).await?;

        if !response.is_success() {
            warn!(
                "{PROVIDER} simple/price returned status {}; prices unavailable",
                response.status
            );
            return Ok(PriceTable::new());
        }

        parse_simple_prices(&response.body)
    }

    async fn fetch_total_market_cap(&self) -> Result<Option<f64>, FetchError> {
        let request = HttpRequest::get(self.endpoint("global")).with_timeout_ms(TIMEOUT_MS);
        let response = self.execute(request).await?;

        if !response.is_success() {
            warn!(
                "{PROVIDER} global returned status {}; total market cap unavailable",
                response.status
            );
            return Ok(None);
        }

        parse_total_market_cap(&response.body)
    }

    async fn fetch_market_cap(&self, id: &str) -> Option<f64> {
        let request = HttpRequest::get(self.endpoint(&format!("coins/{}", urlencoding::encode(id))))
            .with_query("localization", "false")
            .with_query("tickers", "false")
            .with_query("market_data", "true")
            .with_query("community_data", "false")
            .with_query("developer_data", "false")
            .with_query("sparkline", "false")
            .with_timeout_ms(TIMEOUT_MS);

        let body = self.optional_body(request, id, "coin detail").await?;
        match serde_json::from_str::<CoinDetailResponse>(&body) {
            Ok(detail) => detail
                .market_data
                .and_then(|data| data.market_cap)
                .and_then(|cap| cap.usd),
            Err(error) => {
                warn!("{PROVIDER} coin detail for {id} is malformed: {error}");
                None
            }
        }
    }

    async fn fetch_last_daily_bar(&self, id: &str) -> Option<DailyBar> {
        let request =
            HttpRequest::get(self.endpoint(&format!("coins/{}/ohlc", urlencoding::encode(id))))
                .with_query("vs_currency", VS_CURRENCY)
                .with_query("days", "2")
                .with_timeout_ms(TIMEOUT_MS);

        let body = self.optional_body(request, id, "ohlc").await?;
        let bar = parse_last_daily_bar(&body);
        if bar.is_none() {
            warn!("{PROVIDER} ohlc for {id} has no usable row");
        }
        bar
    }

    /// Body of a successful optional lookup; every failure is logged and dropped.
    async fn optional_body(&self, request: HttpRequest, id: &str, what: &str) -> Option<String> {
        match self.execute(request).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                warn!(
                    "{PROVIDER} {what} for {id} returned status {}",
                    response.status
                );
                None
            }
            Err(error) => {
                warn!("{error}");
                None
            }
        }
    }
}

impl MarketDataSource for CoinGeckoAdapter {
    fn simple_prices<'a>(
        &'a self,
        ids: &'a [String],
    ) -> SourceFuture<'a, Result<PriceTable, FetchError>> {
        Box::pin(self.fetch_simple_prices(ids))
    }

    fn total_market_cap<'a>(&'a self) -> SourceFuture<'a, Result<Option<f64>, FetchError>> {
        Box::pin(self.fetch_total_market_cap())
    }

    fn market_cap<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<f64>> {
        Box::pin(self.fetch_market_cap(id))
    }

    fn last_daily_bar<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<DailyBar>> {
        Box::pin(self.fetch_last_daily_bar(id))
    }
}

fn parse_simple_prices(body: &str) -> Result<PriceTable, FetchError> {
    let entries: BTreeMap<String, SimplePriceEntry> = serde_json::from_str(body)
        .map_err(|error| FetchError::decode(PROVIDER, format!("simple/price: {error}")))?;

    Ok(entries
        .into_iter()
        .map(|(id, entry)| (id, PricePoint::new(entry.usd, entry.usd_24h_change)))
        .collect())
}

fn parse_total_market_cap(body: &str) -> Result<Option<f64>, FetchError> {
    let global: GlobalResponse = serde_json::from_str(body)
        .map_err(|error| FetchError::decode(PROVIDER, format!("global: {error}")))?;

    Ok(global
        .data
        .and_then(|data| data.total_market_cap)
        .and_then(|total| total.usd))
}

/// Last of the returned rows; CoinGecko orders them oldest first.
fn parse_last_daily_bar(body: &str) -> Option<DailyBar> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body).ok()?;
    rows.last().and_then(|row| DailyBar::from_row(row))
}

#[derive(Debug, Clone, Deserialize)]
struct SimplePriceEntry {
    #[serde(default)]
    usd: Option<f64>,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UsdAmount {
    #[serde(default)]
    usd: Option<f64>,
}

// Provider sections may arrive as explicit nulls.
#[derive(Debug, Clone, Deserialize)]
struct GlobalResponse {
    #[serde(default)]
    data: Option<GlobalData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GlobalData {
    #[serde(default)]
    total_market_cap: Option<UsdAmount>,
}

#[derive(Debug, Clone, Deserialize)]
struct CoinDetailResponse {
    #[serde(default)]
    market_data: Option<CoinMarketData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CoinMarketData {
    #[serde(default)]
    market_cap: Option<UsdAmount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_prices_keep_partial_entries() {
        let table = parse_simple_prices(
            r#"{"bitcoin":{"usd":64000.5,"usd_24h_change":-1.25},"wlfi":{"usd":0.21}}"#,
        )
        .expect("valid body");

        assert_eq!(
            table.get("bitcoin"),
            Some(&PricePoint::new(Some(64000.5), Some(-1.25)))
        );
        assert_eq!(table.get("wlfi"), Some(&PricePoint::new(Some(0.21), None)));
        assert!(table.get("cardano").is_none());
    }

    #[test]
    fn simple_prices_reject_non_json_success_body() {
        let error = parse_simple_prices("<html>").expect_err("must not decode");
        assert_eq!(error.provider(), PROVIDER);
        assert!(matches!(error, FetchError::Decode { .. }));
    }

    #[test]
    fn global_without_usd_total_is_absent() {
        assert_eq!(
            parse_total_market_cap(r#"{"data":{"total_market_cap":{"eur":1.0}}}"#),
            Ok(None)
        );
        assert_eq!(parse_total_market_cap(r#"{}"#), Ok(None));
        assert_eq!(
            parse_total_market_cap(r#"{"data":{"total_market_cap":null}}"#),
            Ok(None)
        );
        assert_eq!(parse_total_market_cap(r#"{"data":null}"#), Ok(None));
        assert_eq!(
            parse_total_market_cap(r#"{"data":{"total_market_cap":{"usd":3.5e12}}}"#),
            Ok(Some(3.5e12))
        );
    }

    #[test]
    fn last_daily_bar_takes_final_row() {
        let bar = parse_last_daily_bar(
            "[[1704067200000,1.0,1.2,0.9,1.1],[1704153600000,1.1,1.5,1.0,1.3]]",
        )
        .expect("valid rows");

        assert_eq!(bar.ts.unix_millis(), 1_704_153_600_000);
        assert_eq!(bar.close, 1.3);
    }

    #[test]
    fn last_daily_bar_is_absent_for_empty_or_malformed_rows() {
        assert!(parse_last_daily_bar("[]").is_none());
        assert!(parse_last_daily_bar("[[1704067200000,1.0,1.2]]").is_none());
        assert!(parse_last_daily_bar(r#"{"error":"coin not found"}"#).is_none());
    }
}
