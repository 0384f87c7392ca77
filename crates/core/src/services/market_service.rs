use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::market::QuoteCache;
use crate::providers::registry::QuoteProviderRegistry;

/// How long a cached quote stays fresh (5 minutes).
pub const QUOTE_TTL_SECS: i64 = 300;

/// Fetches commodity prices from quote providers with TTL caching.
///
/// Cache strategy: a quote fetched within the last [`QUOTE_TTL_SECS`]
/// is served from cache; anything older is refetched. Providers are
/// tried in registration order, so a configured live API wins and the
/// static catalog fills in when the API is down or unconfigured.
pub struct MarketService {
    registry: QuoteProviderRegistry,
    ttl: Duration,
}

impl MarketService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self {
            registry,
            ttl: Duration::seconds(QUOTE_TTL_SECS),
        }
    }

    /// Override the freshness window (mainly for tests).
    pub fn with_ttl(registry: QuoteProviderRegistry, ttl: Duration) -> Self {
        Self { registry, ttl }
    }

    /// Check if at least one provider can quote the given symbol.
    pub fn has_provider_for(&self, symbol: &str) -> bool {
        self.registry.get_provider_for(symbol).is_some()
    }

    /// Names of all providers that can quote the given symbol.
    pub fn provider_names(&self, symbol: &str) -> Vec<String> {
        self.registry
            .get_providers_for(symbol)
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Get the current price of a commodity.
    ///
    /// 1. Serve from cache if fetched within the TTL.
    /// 2. Otherwise fetch with provider fallback, validate, cache, return.
    pub async fn get_price(
        &self,
        cache: &mut QuoteCache,
        symbol: &str,
    ) -> Result<f64, CoreError> {
        let now = Utc::now();

        if let Some(price) = cache.price_if_fresh(symbol, now, self.ttl) {
            return Ok(price);
        }

        let price = self.fetch_price(symbol).await?;
        cache.set_price(symbol, price, now);
        Ok(price)
    }

    /// Get current prices for several commodities at once.
    /// Returns a map keyed by uppercase symbol; fails on the first
    /// symbol no provider can quote.
    pub async fn get_prices(
        &self,
        cache: &mut QuoteCache,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        let mut prices = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            let price = self.get_price(cache, symbol).await?;
            prices.insert(symbol.to_uppercase(), price);
        }
        Ok(prices)
    }

    /// Internal: fetch a price from providers with automatic fallback.
    ///
    /// Tries providers in registration order. If one fails (API down,
    /// rate limited, unparseable response) the next one is tried.
    /// Returned prices must be finite and non-negative.
    async fn fetch_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let providers = self.registry.get_providers_for(symbol);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(symbol.to_uppercase()));
        }

        let mut last_error = None;

        for provider in &providers {
            match provider.get_current_price(symbol).await {
                Ok(price) => {
                    if !price.is_finite() || price < 0.0 {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!(
                                "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                            ),
                        });
                        continue;
                    }
                    return Ok(price);
                }
                Err(e) => {
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(symbol.to_uppercase())))
    }
}
