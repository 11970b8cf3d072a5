//! Shared fakes for the behavior tests. No test here touches the network.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use marketbrief_core::{
    DailyBar, FetchError, Headline, HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse,
    MarketDataSource, NewsSource, PricePoint, PriceTable, SentimentReading, SentimentSource,
    SourceFuture, UtcDateTime,
};

/// Transport fake answering by URL substring and recording every request.
#[derive(Debug, Default)]
pub struct StubHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url_fragment: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            url_fragment.to_owned(),
            Ok(HttpResponse::new(status, body)),
        ));
        self
    }

    pub fn fail(mut self, url_fragment: &str, message: &str) -> Self {
        self.routes
            .push((url_fragment.to_owned(), Err(HttpError::timeout(message))));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for StubHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "not found")));
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

/// Market source returning fixed values and counting calls.
#[derive(Debug, Default)]
pub struct FixedMarket {
    pub prices: PriceTable,
    pub total_market_cap: Option<f64>,
    pub market_caps: BTreeMap<String, f64>,
    pub daily_bars: BTreeMap<String, DailyBar>,
    pub calls: Mutex<Vec<String>>,
}

impl FixedMarket {
    fn record(&self, call: String) {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push(call);
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .clone()
    }
}

impl MarketDataSource for FixedMarket {
    fn simple_prices<'a>(
        &'a self,
        ids: &'a [String],
    ) -> SourceFuture<'a, Result<PriceTable, FetchError>> {
        self.record(format!("prices:{}", ids.join(",")));
        let table = ids
            .iter()
            .filter_map(|id| self.prices.get(id).map(|point| (id.clone(), *point)))
            .collect();
        Box::pin(async move { Ok(table) })
    }

    fn total_market_cap<'a>(&'a self) -> SourceFuture<'a, Result<Option<f64>, FetchError>> {
        self.record(String::from("global"));
        let total = self.total_market_cap;
        Box::pin(async move { Ok(total) })
    }

    fn market_cap<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<f64>> {
        self.record(format!("cap:{id}"));
        let cap = self.market_caps.get(id).copied();
        Box::pin(async move { cap })
    }

    fn last_daily_bar<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<DailyBar>> {
        self.record(format!("bar:{id}"));
        let bar = self.daily_bars.get(id).copied();
        Box::pin(async move { bar })
    }
}

/// Market source whose mandatory lookups fail at the transport level.
#[derive(Debug, Default)]
pub struct UnreachableMarket;

impl MarketDataSource for UnreachableMarket {
    fn simple_prices<'a>(
        &'a self,
        _ids: &'a [String],
    ) -> SourceFuture<'a, Result<PriceTable, FetchError>> {
        Box::pin(async { Err(FetchError::transport("coingecko", "connection refused")) })
    }

    fn total_market_cap<'a>(&'a self) -> SourceFuture<'a, Result<Option<f64>, FetchError>> {
        Box::pin(async { Err(FetchError::transport("coingecko", "connection refused")) })
    }

    fn market_cap<'a>(&'a self, _id: &'a str) -> SourceFuture<'a, Option<f64>> {
        Box::pin(async { None })
    }

    fn last_daily_bar<'a>(&'a self, _id: &'a str) -> SourceFuture<'a, Option<DailyBar>> {
        Box::pin(async { None })
    }
}

#[derive(Debug, Default)]
pub struct FixedSentiment(pub Option<SentimentReading>);

impl SentimentSource for FixedSentiment {
    fn sentiment<'a>(&'a self) -> SourceFuture<'a, Option<SentimentReading>> {
        let reading = self.0;
        Box::pin(async move { reading })
    }
}

#[derive(Debug, Default)]
pub struct FixedNews(pub Vec<Headline>);

impl NewsSource for FixedNews {
    fn headlines<'a>(&'a self) -> SourceFuture<'a, Vec<Headline>> {
        let headlines = self.0.clone();
        Box::pin(async move { headlines })
    }
}

pub fn daily_bar(open: f64, high: f64, low: f64, close: f64) -> DailyBar {
    DailyBar {
        ts: UtcDateTime::from_unix_millis(1_704_067_200_000).expect("valid timestamp"),
        open,
        high,
        low,
        close,
    }
}

/// Every tracked asset priced, every market cap known, one wick on ARB.
pub fn full_market() -> FixedMarket {
    let prices = [
        ("bitcoin", 64_250.5, 1.2),
        ("ethereum", 3_120.75, -0.8),
        ("pyth-network", 0.4123, 3.5),
        ("cardano", 0.3512, -2.1),
        ("fetch-ai", 1.2345, 0.0),
        ("dogecoin", 0.1234, 5.75),
        ("arbitrum", 0.8123, -4.2),
        ("wlfi", 0.2101, 12.0),
    ]
    .into_iter()
    .map(|(id, price, change)| (id.to_owned(), PricePoint::new(Some(price), Some(change))))
    .collect();

    let market_caps = [
        ("bitcoin", 1_270_000_000_000.0),
        ("tether", 118_000_000_000.0),
    ]
    .into_iter()
    .map(|(id, cap)| (id.to_owned(), cap))
    .collect();

    let daily_bars = [
        ("pyth-network", daily_bar(0.40, 0.42, 0.39, 0.41)),
        ("arbitrum", daily_bar(100.0, 105.0, 99.0, 101.0)),
    ]
    .into_iter()
    .map(|(id, bar)| (id.to_owned(), bar))
    .collect();

    FixedMarket {
        prices,
        total_market_cap: Some(2_400_000_000_000.0),
        market_caps,
        daily_bars,
        calls: Mutex::new(Vec::new()),
    }
}

pub fn three_headlines() -> FixedNews {
    FixedNews(vec![
        Headline::new("Spot ETF inflows hit monthly high"),
        Headline::new("Layer-2 fees fall after upgrade"),
        Headline::new("Exchange lists new perpetuals"),
    ])
}
