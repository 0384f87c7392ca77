use std::collections::HashMap;

use super::api_ninjas::ApiNinjasProvider;
use super::catalog::CatalogProvider;
use super::traits::QuoteProvider;

/// Registry of all available quote providers.
///
/// Providers are tried in registration order; the first one that
/// supports a symbol and returns a usable price wins. New sources can be
/// added without modifying existing code.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers pre-configured.
    ///
    /// API Ninjas (live prices, requires an API key) is registered ahead
    /// of the catalog provider (static reference prices, always
    /// available), so live data wins and the catalog is the offline
    /// fallback.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        if let Some(key) = api_keys.get("api_ninjas") {
            registry.register(Box::new(ApiNinjasProvider::new(key.clone())));
        }

        registry.register(Box::new(CatalogProvider::new()));

        registry
    }

    /// Register a new quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that supports the given symbol.
    pub fn get_provider_for(&self, symbol: &str) -> Option<&dyn QuoteProvider> {
        self.providers
            .iter()
            .find(|p| p.supports(symbol))
            .map(|p| p.as_ref())
    }

    /// Return ALL providers that support the given symbol, ordered by
    /// registration priority. Used for fallback: if the first provider
    /// fails, try the next one.
    pub fn get_providers_for(&self, symbol: &str) -> Vec<&dyn QuoteProvider> {
        self.providers
            .iter()
            .filter(|p| p.supports(symbol))
            .map(|p| p.as_ref())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
