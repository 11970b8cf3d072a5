//! Static reference tables: tracked assets, provider identifiers and
//! comparison levels.
//!
//! The tables are built once into an immutable [`ReferenceData`] and passed to
//! the brief builder. Adding levels for an asset means editing [`LEVELS`].

use std::collections::BTreeMap;

use crate::{Asset, ComparisonLevel, Symbol, ValidationError};

/// Ticker to CoinGecko coin id.
const PROVIDER_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDT", "tether"),
    ("PYTH", "pyth-network"),
    ("ADA", "cardano"),
    ("FET", "fetch-ai"),
    ("DOGE", "dogecoin"),
    ("ARB", "arbitrum"),
    ("WLFI", "wlfi"),
];

/// Fibonacci extension levels per ticker. WLFI has no stable reference price yet.
const LEVELS: &[(&str, &[(&str, f64)])] = &[
    ("PYTH", &[("1.618", 1.8095), ("2.618", 2.8712), ("3.618", 3.9329)]),
    ("ADA", &[("1.618", 4.8788), ("2.618", 7.7801), ("3.618", 10.6815)]),
    ("FET", &[("1.618", 5.3960), ("2.618", 8.5070), ("3.618", 11.6180)]),
    ("DOGE", &[("1.618", 1.1597), ("2.618", 1.8442), ("3.618", 2.5287)]),
    ("ARB", &[("1.618", 3.6833), ("2.618", 5.7914), ("3.618", 7.8996)]),
    ("WLFI", &[]),
];

const BENCHMARKS: &[&str] = &["BTC", "ETH"];
const PORTFOLIO: &[&str] = &["PYTH", "ADA", "FET", "DOGE", "ARB", "WLFI"];
const STABLECOIN: &str = "USDT";
const DOMINANCE_REFERENCE: &str = "BTC";

/// Immutable asset tables for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    assets: BTreeMap<Symbol, Asset>,
    benchmarks: Vec<Symbol>,
    portfolio: Vec<Symbol>,
    stablecoin: Symbol,
    dominance_reference: Symbol,
}

impl ReferenceData {
    /// Builds the built-in tables.
    pub fn builtin() -> Result<Self, ValidationError> {
        let mut assets = BTreeMap::new();
        for (ticker, provider_id) in PROVIDER_IDS {
            let symbol = Symbol::parse(ticker)?;
            assets.insert(symbol.clone(), Asset::new(symbol, Some(*provider_id)));
        }

        for (ticker, levels) in LEVELS {
            let symbol = Symbol::parse(ticker)?;
            let levels = levels
                .iter()
                .map(|(label, price)| ComparisonLevel::new(*label, *price))
                .collect::<Result<Vec<_>, _>>()?;
            let asset = assets
                .remove(&symbol)
                .unwrap_or_else(|| Asset::new(symbol.clone(), None));
            assets.insert(symbol, asset.with_levels(levels));
        }

        Ok(Self::new(
            assets.into_values().collect(),
            parse_all(BENCHMARKS)?,
            parse_all(PORTFOLIO)?,
            Symbol::parse(STABLECOIN)?,
            Symbol::parse(DOMINANCE_REFERENCE)?,
        ))
    }

    /// Builds tables from explicit parts. Every referenced ticker gets an
    /// entry, even when it has no provider mapping.
    pub fn new(
        assets: Vec<Asset>,
        benchmarks: Vec<Symbol>,
        portfolio: Vec<Symbol>,
        stablecoin: Symbol,
        dominance_reference: Symbol,
    ) -> Self {
        let mut table = assets
            .into_iter()
            .map(|asset| (asset.symbol.clone(), asset))
            .collect::<BTreeMap<_, _>>();

        for symbol in benchmarks
            .iter()
            .chain(portfolio.iter())
            .chain([&stablecoin, &dominance_reference])
        {
            table
                .entry(symbol.clone())
                .or_insert_with(|| Asset::new(symbol.clone(), None));
        }

        Self {
            assets: table,
            benchmarks,
            portfolio,
            stablecoin,
            dominance_reference,
        }
    }

    pub fn asset(&self, symbol: &Symbol) -> Option<&Asset> {
        self.assets.get(symbol)
    }

    pub fn provider_id(&self, symbol: &Symbol) -> Option<&str> {
        self.asset(symbol)?.provider_id.as_deref()
    }

    pub fn benchmarks(&self) -> &[Symbol] {
        &self.benchmarks
    }

    pub fn portfolio(&self) -> &[Symbol] {
        &self.portfolio
    }

    pub fn stablecoin(&self) -> &Symbol {
        &self.stablecoin
    }

    pub fn dominance_reference(&self) -> &Symbol {
        &self.dominance_reference
    }

    /// Provider ids for the bulk price lookup: benchmarks then portfolio,
    /// skipping assets without a mapping.
    pub fn price_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for symbol in self.benchmarks.iter().chain(self.portfolio.iter()) {
            if let Some(id) = self.provider_id(symbol) {
                if !ids.iter().any(|existing| existing == id) {
                    ids.push(id.to_owned());
                }
            }
        }
        ids
    }
}

fn parse_all(tickers: &[&str]) -> Result<Vec<Symbol>, ValidationError> {
    tickers.iter().map(|ticker| Symbol::parse(ticker)).collect()
}
