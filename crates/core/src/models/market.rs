use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::commodity::CommodityCategory;

/// One cached price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotePoint {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Latest-price cache keyed by uppercase symbol.
///
/// Commodity prices move slowly enough that a quote is reusable for a
/// few minutes; the market service treats an entry as fresh within its
/// TTL and refetches after that. Persisted in the session snapshot so a
/// reloaded session starts with the last known prices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteCache {
    entries: HashMap<String, QuotePoint>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached observation for a symbol, fresh or not.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&QuotePoint> {
        self.entries.get(&symbol.to_uppercase())
    }

    /// The cached price for a symbol, regardless of age.
    #[must_use]
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).map(|q| q.price)
    }

    /// The cached price if it was fetched within `max_age` of `now`.
    #[must_use]
    pub fn price_if_fresh(&self, symbol: &str, now: DateTime<Utc>, max_age: Duration) -> Option<f64> {
        self.get(symbol)
            .filter(|q| now - q.fetched_at <= max_age)
            .map(|q| q.price)
    }

    /// Insert or overwrite the observation for a symbol.
    pub fn set_price(&mut self, symbol: &str, price: f64, fetched_at: DateTime<Utc>) {
        self.entries
            .insert(symbol.to_uppercase(), QuotePoint { price, fetched_at });
    }

    /// Remove observations fetched before `cutoff`.
    /// Returns the number of entries removed.
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, q| q.fetched_at >= cutoff);
        before - self.entries.len()
    }

    /// Cached symbols, sorted for deterministic output.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.entries.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached observations.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A display-ready market quote: catalog reference data combined with
/// the latest price. `change` is measured against the reference level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub name: String,
    pub category: CommodityCategory,
    pub price: f64,
    pub change: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}
