//! # Brief Builder
//!
//! Collects every input of a brief from the sources, then renders the report.
//! Collection and rendering are separate steps: [`render`] is a pure function
//! of [`BriefInputs`], so identical inputs give byte-identical text.
//!
//! Sections, always in this order:
//!
//! 1. Market state (benchmarks, stablecoin dominance, TOTAL2)
//! 2. Market metrics (sentiment, on-chain placeholders)
//! 3. Portfolio (prices, comparison levels, wick warnings)
//! 4. News
//! 5. Risk signals

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::info;

use crate::data_source::{MarketDataSource, NewsSource, SentimentSource};
use crate::format::{
    direction_marker, neutral_marker, signed_percent_or_unavailable, usd, usd_or_unavailable,
    UNAVAILABLE,
};
use crate::metrics::{has_upper_wick, SentimentBand};
use crate::reference::ReferenceData;
use crate::{
    DailyBar, FetchError, Headline, MarketSnapshot, PricePoint, PriceTable, SentimentReading,
    Symbol,
};

const HEADER: &str = "🧠 *DAILY BRIEF*\n_(as of send time)_\n";

const BENCHMARK_DIGITS: usize = 2;
const PORTFOLIO_DIGITS: usize = 4;
const TRILLION: f64 = 1e12;
const LEVEL_INDENT: &str = "   ";

/// Everything one brief is rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BriefInputs {
    pub prices: PriceTable,
    pub snapshot: MarketSnapshot,
    pub sentiment: Option<SentimentReading>,
    pub daily_bars: BTreeMap<Symbol, DailyBar>,
    pub headlines: Vec<Headline>,
}

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    lines: Vec<String>,
}

impl Section {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Final brief text. Rendered once at assembly and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    sections: Vec<Section>,
    text: String,
}

impl Report {
    fn assemble(sections: [Section; 5]) -> Self {
        let body = sections
            .iter()
            .map(Section::render)
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            text: format!("{HEADER}{body}"),
            sections: sections.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(Section::title).collect()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Orchestrates the sources for one brief.
pub struct BriefBuilder<'a> {
    reference: &'a ReferenceData,
    market: &'a dyn MarketDataSource,
    sentiment: &'a dyn SentimentSource,
    news: &'a dyn NewsSource,
}

impl<'a> BriefBuilder<'a> {
    pub fn new(
        reference: &'a ReferenceData,
        market: &'a dyn MarketDataSource,
        sentiment: &'a dyn SentimentSource,
        news: &'a dyn NewsSource,
    ) -> Self {
        Self {
            reference,
            market,
            sentiment,
            news,
        }
    }

    /// Fetches all inputs and renders the report.
    pub async fn build(&self) -> Result<Report, FetchError> {
        let inputs = self.collect().await?;
        Ok(render(self.reference, &inputs))
    }

    /// Fetches all inputs, one call at a time.
    ///
    /// Only the bulk price and global totals lookups can fail the run.
    pub async fn collect(&self) -> Result<BriefInputs, FetchError> {
        let reference = self.reference;

        let ids = reference.price_ids();
        let prices = self.market.simple_prices(&ids).await?;
        info!("fetched prices for {}/{} assets", prices.len(), ids.len());

        let total_market_cap = self.market.total_market_cap().await?;
        let reference_market_cap = self.market_cap_of(reference.dominance_reference()).await;
        let stablecoin_market_cap = self.market_cap_of(reference.stablecoin()).await;
        let snapshot = MarketSnapshot {
            total_market_cap,
            reference_market_cap,
            stablecoin_market_cap,
        };

        let sentiment = self.sentiment.sentiment().await;
        info!(
            "sentiment band: {}",
            SentimentBand::classify(sentiment).as_str()
        );

        let mut daily_bars = BTreeMap::new();
        for symbol in reference.portfolio() {
            let Some(id) = reference.provider_id(symbol) else {
                continue;
            };
            if let Some(bar) = self.market.last_daily_bar(id).await {
                daily_bars.insert(symbol.clone(), bar);
            }
        }

        let headlines = self.news.headlines().await;
        info!(
            "collected brief inputs: {} daily bars, {} headlines",
            daily_bars.len(),
            headlines.len()
        );

        Ok(BriefInputs {
            prices,
            snapshot,
            sentiment,
            daily_bars,
            headlines,
        })
    }

    async fn market_cap_of(&self, symbol: &Symbol) -> Option<f64> {
        let id = self.reference.provider_id(symbol)?;
        self.market.market_cap(id).await
    }
}

/// Renders a report from collected inputs.
pub fn render(reference: &ReferenceData, inputs: &BriefInputs) -> Report {
    Report::assemble([
        market_state(reference, inputs),
        market_metrics(inputs),
        portfolio(reference, inputs),
        news(inputs),
        risk_signals(),
    ])
}

fn price_of(reference: &ReferenceData, inputs: &BriefInputs, symbol: &Symbol) -> PricePoint {
    reference
        .provider_id(symbol)
        .and_then(|id| inputs.prices.get(id))
        .copied()
        .unwrap_or_default()
}

fn market_state(reference: &ReferenceData, inputs: &BriefInputs) -> Section {
    let benchmarks = reference.benchmarks().iter().map(|symbol| {
        let point = price_of(reference, inputs, symbol);
        format!(
            "• {symbol}: {}  {} {}",
            usd_or_unavailable(point.price, BENCHMARK_DIGITS),
            signed_percent_or_unavailable(point.change_24h),
            direction_marker(point.change_24h)
        )
    });

    let dominance_label = format!("{}.D", reference.stablecoin());
    let dominance = match inputs.snapshot.stablecoin_dominance() {
        Some(value) => format!("• {dominance_label}: {value:.2}%  {}", neutral_marker()),
        None => format!("• {dominance_label}: {UNAVAILABLE}"),
    };

    let total2 = match inputs.snapshot.total_excluding_reference() {
        Some(value) => format!("• TOTAL2: {} T  {}", usd(value / TRILLION, 3), neutral_marker()),
        None => format!("• TOTAL2: {UNAVAILABLE}"),
    };

    Section::new("*1) 📈 Market state*")
        .lines(benchmarks)
        .line(dominance)
        .line(total2)
}

fn market_metrics(inputs: &BriefInputs) -> Section {
    let band = SentimentBand::classify(inputs.sentiment);
    let value = inputs
        .sentiment
        .map_or_else(|| UNAVAILABLE.to_owned(), |reading| reading.value().to_string());
    let no_data = SentimentBand::Unknown.marker();

    Section::new("*2) 🧮 Market metrics*")
        .line(format!("• Fear & Greed: {value} ({})", band.marker()))
        .line(format!("• NUPL: {UNAVAILABLE} (no on-chain source) {no_data}"))
        .line(format!("• MVRV: {UNAVAILABLE} (no on-chain source) {no_data}"))
        .line(
            "💡 *Comment:* as Fear & Greed climbs toward 75-80, raise caution; \
             without NUPL/MVRV, lean on price, wicks and USDT.D.",
        )
}

fn portfolio(reference: &ReferenceData, inputs: &BriefInputs) -> Section {
    let blocks = reference
        .portfolio()
        .iter()
        .map(|symbol| asset_block(reference, inputs, symbol));

    Section::new("*3) 🌕 Portfolio: prices and levels*").lines(blocks)
}

fn asset_block(reference: &ReferenceData, inputs: &BriefInputs, symbol: &Symbol) -> String {
    let point = price_of(reference, inputs, symbol);
    let mut block = format!(
        "• {symbol}: {}  {} {}",
        usd_or_unavailable(point.price, PORTFOLIO_DIGITS),
        signed_percent_or_unavailable(point.change_24h),
        direction_marker(point.change_24h)
    );

    let levels = reference
        .asset(symbol)
        .map(|asset| asset.levels.as_slice())
        .unwrap_or_default();
    block.push('\n');
    block.push_str(LEVEL_INDENT);
    if levels.is_empty() {
        block.push_str("(levels to be added later)");
    } else {
        let rendered = levels
            .iter()
            .map(|level| format!("{} → {}", level.label, usd(level.price, PORTFOLIO_DIGITS)))
            .collect::<Vec<_>>()
            .join(" | ");
        block.push_str(&rendered);
    }

    if inputs.daily_bars.get(symbol).is_some_and(has_upper_wick) {
        block.push('\n');
        block.push_str(LEVEL_INDENT);
        block.push_str("⚠️ *Upper wick on the daily*: be ready to take profit.");
    }

    block
}

fn news(inputs: &BriefInputs) -> Section {
    let section = Section::new("*4) 🗞 News of the day*");
    let section = if inputs.headlines.is_empty() {
        section.line("No major news.")
    } else {
        section.lines(
            inputs
                .headlines
                .iter()
                .map(|headline| format!("• {}", headline.as_str())),
        )
    };

    section.line(
        "💬 *What to watch:* regulatory news (SEC/ETF), major listings and hard forks \
         trigger volatility instantly.",
    )
}

fn risk_signals() -> Section {
    Section::new("*5) 📉 Risk and profit-taking signals*")
        .line("• Long daily upper wicks plus a 24h jump above 8-10% → take partial profit.")
        .line("• USDT.D rising while TOTAL2 falls → reversal or short-squeeze risk.")
        .line("• Fear & Greed turning 🔴 → take profit in steps.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn symbol(ticker: &str) -> Symbol {
        Symbol::parse(ticker).expect("valid symbol")
    }

    fn reference() -> ReferenceData {
        ReferenceData::builtin().expect("builtin tables are valid")
    }

    #[test]
    fn empty_inputs_render_every_section_with_unavailable_markers() {
        let report = render(&reference(), &BriefInputs::default());
        let text = report.as_str();

        assert_eq!(report.section_titles().len(), 5);
        assert!(text.starts_with(HEADER));
        assert!(text.contains("• BTC: N/A  N/A 🟢"));
        assert!(text.contains("• USDT.D: N/A"));
        assert!(text.contains("• TOTAL2: N/A"));
        assert!(text.contains("• Fear & Greed: N/A (⚪️)"));
        assert!(text.contains("No major news."));
    }

    #[test]
    fn benchmark_uses_two_decimals_and_portfolio_four() {
        let mut inputs = BriefInputs::default();
        inputs
            .prices
            .insert("bitcoin".into(), PricePoint::new(Some(64_250.5), Some(-1.234)));
        inputs
            .prices
            .insert("cardano".into(), PricePoint::new(Some(0.35), Some(4.5)));

        let text = render(&reference(), &inputs).into_text();

        assert!(text.contains("• BTC: $64,250.50  -1.23% 🔴"));
        assert!(text.contains("• ADA: $0.3500  +4.50% 🟢"));
    }

    #[test]
    fn levels_render_with_arrow_and_pending_placeholder() {
        let text = render(&reference(), &BriefInputs::default()).into_text();

        assert!(text.contains("   1.618 → $1.8095 | 2.618 → $2.8712 | 3.618 → $3.9329"));
        assert!(text.contains("• WLFI: N/A  N/A 🟢\n   (levels to be added later)"));
    }

    #[test]
    fn wick_warning_only_follows_flagged_asset() {
        let mut inputs = BriefInputs::default();
        inputs.daily_bars.insert(
            symbol("DOGE"),
            DailyBar {
                ts: UtcDateTime::from_unix_millis(0).expect("epoch"),
                open: 100.0,
                high: 105.0,
                low: 99.0,
                close: 101.0,
            },
        );

        let report = render(&reference(), &inputs);
        let text = report.as_str();

        assert_eq!(text.matches("Upper wick on the daily").count(), 1);
        let doge = text.find("• DOGE").expect("doge block");
        let arb = text.find("• ARB").expect("arb block");
        let warning = text.find("⚠️").expect("warning");
        assert!(doge < warning && warning < arb);
    }

    #[test]
    fn total2_is_scaled_to_trillions() {
        let inputs = BriefInputs {
            snapshot: MarketSnapshot {
                total_market_cap: Some(3_800_000_000_000.0),
                reference_market_cap: Some(2_250_000_000_000.0),
                stablecoin_market_cap: Some(160_000_000_000.0),
            },
            ..BriefInputs::default()
        };

        let text = render(&reference(), &inputs).into_text();

        assert!(text.contains("• TOTAL2: $1.550 T  🟢"));
        assert!(text.contains("• USDT.D: 4.21%  🟢"));
    }
}
