pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use models::{
    alert::{AlertCondition, PriceAlert},
    analytics::PortfolioSummary,
    commodity::{Commodity, CommodityCatalog, CommodityCategory},
    market::{MarketQuote, QuoteCache},
    portfolio::{Portfolio, Position},
    settings::Settings,
    trade::{Trade, TradeLog, TradeSide},
    watchlist::Watchlist,
};
use providers::registry::QuoteProviderRegistry;
use services::{
    alert_service::AlertService, analytics_service::AnalyticsService,
    ledger_service::LedgerService, market_service::MarketService,
};
use storage::store::{SessionSnapshot, SessionStore};

use errors::CoreError;

/// Cash a brand new session starts with.
pub const DEFAULT_STARTING_CASH: f64 = 100_000.0;

/// Symbols a brand new session watches out of the box.
pub const DEFAULT_WATCHLIST: [&str; 3] = ["GOLD", "SILVER", "CRUDEOIL"];

/// Main entry point for the Commodity Desk core library.
///
/// Owns one trading session — portfolio, trade log, watchlist, price
/// alerts, settings, quote cache — and all services needed to operate
/// on it. All mutation goes through this facade; persistence happens
/// through an injected [`SessionStore`] (load at start, save after
/// mutation).
#[must_use]
pub struct TradingDesk {
    portfolio: Portfolio,
    trades: TradeLog,
    watchlist: Watchlist,
    alerts: Vec<PriceAlert>,
    settings: Settings,
    quote_cache: QuoteCache,
    catalog: CommodityCatalog,
    ledger_service: LedgerService,
    market_service: MarketService,
    alert_service: AlertService,
    analytics_service: AnalyticsService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for TradingDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingDesk")
            .field("cash", &self.portfolio.cash)
            .field("positions", &self.portfolio.positions.len())
            .field("trades", &self.trades.len())
            .field("watchlist", &self.watchlist.len())
            .field("alerts", &self.alerts.len())
            .field("cached_quotes", &self.quote_cache.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TradingDesk {
    /// Create a brand new session with default settings and starting cash.
    pub fn create_new() -> Self {
        Self::build(SessionSnapshot {
            portfolio: Portfolio::new(DEFAULT_STARTING_CASH),
            trades: TradeLog::new(),
            watchlist: Watchlist::from_symbols(DEFAULT_WATCHLIST),
            alerts: Vec::new(),
            settings: Settings::default(),
            quote_cache: QuoteCache::new(),
        })
    }

    /// Create a brand new session with a custom starting cash balance.
    pub fn with_starting_cash(starting_cash: f64) -> Result<Self, CoreError> {
        if !starting_cash.is_finite() || starting_cash < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "starting cash must be a non-negative number, got {starting_cash}"
            )));
        }
        let mut snapshot = SessionSnapshot {
            portfolio: Portfolio::new(starting_cash),
            trades: TradeLog::new(),
            watchlist: Watchlist::from_symbols(DEFAULT_WATCHLIST),
            alerts: Vec::new(),
            settings: Settings::default(),
            quote_cache: QuoteCache::new(),
        };
        snapshot.settings.starting_cash = starting_cash;
        Ok(Self::build(snapshot))
    }

    /// Rebuild a session from a previously taken snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self::build(snapshot)
    }

    /// The session state in its persistable shape.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            portfolio: self.portfolio.clone(),
            trades: self.trades.clone(),
            watchlist: self.watchlist.clone(),
            alerts: self.alerts.clone(),
            settings: self.settings.clone(),
            quote_cache: self.quote_cache.clone(),
        }
    }

    /// Load a session from a store. Fails with `SessionNotFound` if the
    /// store has no record for the id.
    pub fn load_from_store(
        store: &dyn SessionStore,
        session_id: &str,
    ) -> Result<Self, CoreError> {
        match store.load(session_id)? {
            Some(snapshot) => Ok(Self::build(snapshot)),
            None => Err(CoreError::SessionNotFound(session_id.to_string())),
        }
    }

    /// Save the session to a store under the given id.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_store(
        &mut self,
        store: &mut dyn SessionStore,
        session_id: &str,
    ) -> Result<(), CoreError> {
        store.save(session_id, &self.snapshot())?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if the session has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Execute a trade: validate against the ledger, mutate cash and
    /// positions, and record the trade in the log.
    ///
    /// The price is supplied by the caller (resolved beforehand, e.g.
    /// via [`live_price`](Self::live_price)); nothing here blocks. On
    /// failure the specific error is returned and no state changes.
    pub fn execute_trade(
        &mut self,
        symbol: &str,
        side: TradeSide,
        quantity: f64,
        price: f64,
    ) -> Result<Trade, CoreError> {
        self.ledger_service
            .apply_trade(&mut self.portfolio, symbol, side, quantity, price)?;

        let trade = self
            .trades
            .record(symbol, side, quantity, price, chrono::Utc::now())
            .clone();
        self.dirty = true;
        Ok(trade)
    }

    /// Check whether a trade would be accepted, without executing it.
    pub fn can_execute(
        &self,
        symbol: &str,
        side: TradeSide,
        quantity: f64,
        price: f64,
    ) -> bool {
        self.ledger_service
            .validate_trade(&self.portfolio, symbol, side, quantity, price)
            .is_ok()
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Available cash.
    #[must_use]
    pub fn cash(&self) -> f64 {
        self.portfolio.cash
    }

    /// All open positions, sorted by symbol for deterministic output.
    #[must_use]
    pub fn positions(&self) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self.portfolio.positions.values().collect();
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        positions
    }

    /// The position for a symbol, if one is open.
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.portfolio.position(symbol)
    }

    #[must_use]
    pub fn position_count(&self) -> usize {
        self.portfolio.positions.len()
    }

    /// Total acquisition cost across all open positions.
    #[must_use]
    pub fn invested_value(&self) -> f64 {
        self.portfolio.total_cost_basis()
    }

    // ── Trade Log ───────────────────────────────────────────────────

    /// Full trade history, most recent first.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        self.trades.all()
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// The most recently executed trade, if any.
    #[must_use]
    pub fn latest_trade(&self) -> Option<&Trade> {
        self.trades.latest()
    }

    /// Trades for one commodity, most recent first.
    #[must_use]
    pub fn trades_for(&self, symbol: &str) -> Vec<&Trade> {
        self.trades.for_symbol(symbol)
    }

    /// Trades of one side (all buys or all sells), most recent first.
    #[must_use]
    pub fn trades_by_side(&self, side: TradeSide) -> Vec<&Trade> {
        self.trades.by_side(side)
    }

    // ── Watchlist ───────────────────────────────────────────────────

    /// Add a symbol to the watchlist. No-op if already watched.
    /// Returns `true` if the symbol was added.
    pub fn add_to_watchlist(&mut self, symbol: &str) -> bool {
        let added = self.watchlist.add(symbol);
        if added {
            self.dirty = true;
        }
        added
    }

    /// Remove a symbol from the watchlist. No-op if absent.
    /// Returns `true` if the symbol was removed.
    pub fn remove_from_watchlist(&mut self, symbol: &str) -> bool {
        let removed = self.watchlist.remove(symbol);
        if removed {
            self.dirty = true;
        }
        removed
    }

    #[must_use]
    pub fn is_watched(&self, symbol: &str) -> bool {
        self.watchlist.contains(symbol)
    }

    /// Watched symbols in insertion order.
    #[must_use]
    pub fn watchlist(&self) -> &[String] {
        self.watchlist.symbols()
    }

    // ── Price Alerts ────────────────────────────────────────────────

    /// Set a price alert for a symbol, replacing any existing one.
    /// Returns the new alert's id.
    pub fn set_price_alert(
        &mut self,
        symbol: &str,
        condition: AlertCondition,
        target_price: f64,
    ) -> Result<uuid::Uuid, CoreError> {
        let id = self
            .alert_service
            .set_alert(&mut self.alerts, symbol, condition, target_price)?;
        self.dirty = true;
        Ok(id)
    }

    /// Remove the alert for a symbol. Returns `true` if one existed.
    pub fn remove_price_alert(&mut self, symbol: &str) -> bool {
        let removed = self.alert_service.remove_alert(&mut self.alerts, symbol);
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// All alerts, set order.
    #[must_use]
    pub fn price_alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    /// The alert for a symbol, if one is set.
    #[must_use]
    pub fn price_alert_for(&self, symbol: &str) -> Option<&PriceAlert> {
        self.alert_service.alert_for(&self.alerts, symbol)
    }

    /// Check all alerts against caller-resolved prices (keyed by
    /// uppercase symbol). Met alerts are marked triggered and returned.
    pub fn check_price_alerts(&mut self, prices: &HashMap<String, f64>) -> Vec<PriceAlert> {
        let triggered = self.alert_service.check_alerts(&mut self.alerts, prices);
        if !triggered.is_empty() {
            self.dirty = true;
        }
        triggered
    }

    /// Fetch current prices for every active alert's symbol, then check.
    /// Returns the alerts that fired.
    pub async fn refresh_and_check_alerts(&mut self) -> Result<Vec<PriceAlert>, CoreError> {
        let symbols: Vec<String> = self
            .alerts
            .iter()
            .filter(|a| a.active && !a.triggered)
            .map(|a| a.symbol.clone())
            .collect();
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let prices = self
            .market_service
            .get_prices(&mut self.quote_cache, &symbols)
            .await?;
        self.dirty = true; // quote cache was refreshed
        Ok(self.check_price_alerts(&prices))
    }

    /// Drop alerts that have already fired.
    /// Returns the number of alerts removed.
    pub fn clear_triggered_alerts(&mut self) -> usize {
        let removed = self.alert_service.clear_triggered(&mut self.alerts);
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    // ── Market Data ─────────────────────────────────────────────────

    /// All catalog commodities, catalog order.
    #[must_use]
    pub fn commodities(&self) -> &[Commodity] {
        self.catalog.all()
    }

    /// Catalog commodities in one category.
    #[must_use]
    pub fn commodities_in(&self, category: CommodityCategory) -> Vec<&Commodity> {
        self.catalog.in_category(category)
    }

    /// Case-insensitive catalog lookup.
    #[must_use]
    pub fn find_commodity(&self, symbol: &str) -> Option<&Commodity> {
        self.catalog.find(symbol)
    }

    /// Current price of a commodity: quote cache first (5-minute TTL),
    /// then the configured providers in fallback order.
    pub async fn live_price(&mut self, symbol: &str) -> Result<f64, CoreError> {
        let price = self
            .market_service
            .get_price(&mut self.quote_cache, symbol)
            .await?;
        self.dirty = true; // the cache may have been refreshed
        Ok(price)
    }

    /// A display-ready quote: catalog reference data plus the current
    /// price, with `change` measured against the reference level.
    /// Fails with `UnknownCommodity` for symbols not in the catalog.
    pub async fn market_quote(&mut self, symbol: &str) -> Result<MarketQuote, CoreError> {
        let commodity = self
            .catalog
            .find(symbol)
            .cloned()
            .ok_or_else(|| CoreError::UnknownCommodity(symbol.to_uppercase()))?;

        let price = self.live_price(&commodity.symbol).await?;

        Ok(MarketQuote {
            symbol: commodity.symbol,
            name: commodity.name,
            category: commodity.category,
            price,
            change: price - commodity.reference_price,
            high: commodity.high,
            low: commodity.low,
            volume: commodity.volume,
        })
    }

    /// Warm the quote cache for every watched symbol.
    pub async fn refresh_watchlist_quotes(&mut self) -> Result<(), CoreError> {
        let symbols: Vec<String> = self.watchlist.symbols().to_vec();
        for symbol in &symbols {
            self.market_service
                .get_price(&mut self.quote_cache, symbol)
                .await?;
        }
        if !symbols.is_empty() {
            self.dirty = true;
        }
        Ok(())
    }

    /// The cached price for a symbol, regardless of age.
    #[must_use]
    pub fn cached_price(&self, symbol: &str) -> Option<f64> {
        self.quote_cache.price(symbol)
    }

    /// Manually insert a price into the quote cache (useful for testing,
    /// offline use, or seeding from an external feed).
    pub fn set_cached_price(&mut self, symbol: &str, price: f64) {
        self.quote_cache.set_price(symbol, price, chrono::Utc::now());
        self.dirty = true;
    }

    /// Number of cached quotes.
    #[must_use]
    pub fn quote_cache_len(&self) -> usize {
        self.quote_cache.len()
    }

    /// Remove cached quotes fetched before `cutoff`.
    /// Returns the number of entries removed.
    pub fn prune_quote_cache(&mut self, cutoff: chrono::DateTime<chrono::Utc>) -> usize {
        let removed = self.quote_cache.prune_older_than(cutoff);
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    /// Clear all cached quotes.
    pub fn clear_quote_cache(&mut self) {
        self.quote_cache.clear();
        self.dirty = true;
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Value every open position at market prices and aggregate totals.
    /// Requires a price for each held symbol (live or cached).
    pub async fn portfolio_summary(&mut self) -> Result<PortfolioSummary, CoreError> {
        self.analytics_service
            .portfolio_summary(
                &self.portfolio,
                &self.trades,
                &self.catalog,
                &self.market_service,
                &mut self.quote_cache,
            )
            .await
    }

    // ── Settings & Providers ────────────────────────────────────────

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set an API key for a provider (e.g., "api_ninjas").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.settings.api_keys.insert(provider, key);

        let registry = QuoteProviderRegistry::new_with_defaults(&self.settings.api_keys);
        self.market_service = MarketService::new(registry);
        self.dirty = true;
    }

    /// Remove an API key for a provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.settings.api_keys.remove(provider).is_some();
        if removed {
            let registry = QuoteProviderRegistry::new_with_defaults(&self.settings.api_keys);
            self.market_service = MarketService::new(registry);
            self.dirty = true;
        }
        removed
    }

    /// Check if at least one price source can quote the given symbol.
    #[must_use]
    pub fn is_provider_available(&self, symbol: &str) -> bool {
        self.market_service.has_provider_for(symbol)
    }

    /// Names of the price sources available for a symbol, priority order.
    #[must_use]
    pub fn provider_names(&self, symbol: &str) -> Vec<String> {
        self.market_service.provider_names(symbol)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the trade history as a JSON string.
    pub fn export_trades_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self.trades.all())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize trades: {e}")))
    }

    /// Export the trade history as a CSV string.
    /// Columns: id, side, symbol, quantity, price, total, timestamp
    #[must_use]
    pub fn export_trades_to_csv(&self) -> String {
        let mut csv = String::from("id,side,symbol,quantity,price,total,timestamp\n");
        for trade in self.trades.all() {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                trade.id,
                trade.side,
                trade.symbol,
                trade.quantity,
                trade.price,
                trade.total,
                trade.timestamp.to_rfc3339(),
            ));
        }
        csv
    }

    /// Export the full session snapshot as JSON (for debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize session: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(snapshot: SessionSnapshot) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&snapshot.settings.api_keys);
        let market_service = MarketService::new(registry);

        Self {
            portfolio: snapshot.portfolio,
            trades: snapshot.trades,
            watchlist: snapshot.watchlist,
            alerts: snapshot.alerts,
            settings: snapshot.settings,
            quote_cache: snapshot.quote_cache,
            catalog: CommodityCatalog::default(),
            ledger_service: LedgerService::new(),
            market_service,
            alert_service: AlertService::new(),
            analytics_service: AnalyticsService::new(),
            dirty: false,
        }
    }
}
