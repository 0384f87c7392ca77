use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for commodity price sources.
///
/// A source may fail or serve stale data; callers fall back through the
/// registry's providers in order. Replacing a broken API means swapping
/// one implementation — the rest of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Whether this source can quote the given symbol.
    fn supports(&self, symbol: &str) -> bool;

    /// Get the current price of a commodity.
    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError>;
}
