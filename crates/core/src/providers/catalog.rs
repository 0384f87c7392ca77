use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::commodity::CommodityCatalog;
use super::traits::QuoteProvider;

/// Quote source backed by the static commodity catalog.
///
/// Serves the catalog's reference price for every listed symbol, so the
/// desk stays fully usable offline and without any API key. Registered
/// last: a live provider always wins when one is configured.
pub struct CatalogProvider {
    catalog: CommodityCatalog,
}

impl CatalogProvider {
    pub fn new() -> Self {
        Self {
            catalog: CommodityCatalog::default(),
        }
    }

    pub fn with_catalog(catalog: CommodityCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for CatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for CatalogProvider {
    fn name(&self) -> &str {
        "catalog"
    }

    fn supports(&self, symbol: &str) -> bool {
        self.catalog.contains(symbol)
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.catalog
            .find(symbol)
            .map(|c| c.reference_price)
            .ok_or_else(|| CoreError::PriceNotAvailable {
                symbol: symbol.to_uppercase(),
            })
    }
}
