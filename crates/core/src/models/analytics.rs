use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::commodity::CommodityCategory;

/// Snapshot of the whole portfolio valued at market prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// When this summary was computed
    pub as_of: DateTime<Utc>,

    /// Available cash
    pub cash: f64,

    /// Market value of all open positions
    pub market_value: f64,

    /// Cash plus position market value
    pub total_value: f64,

    /// Total acquisition cost of open positions
    pub cost_basis: f64,

    /// market_value - cost_basis
    pub unrealized_pnl: f64,

    /// Percentage return on open positions: (unrealized_pnl / cost_basis) * 100
    pub return_pct: f64,

    /// Number of trades executed so far
    pub trade_count: usize,

    /// Per-position breakdown, largest allocation first
    pub holdings: Vec<HoldingSummary>,
}

/// Valuation of a single open position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingSummary {
    /// Commodity symbol
    pub symbol: String,

    /// Display name from the catalog, if the symbol is listed
    pub name: Option<String>,

    /// Category from the catalog, if the symbol is listed
    pub category: Option<CommodityCategory>,

    /// Units held
    pub quantity: f64,

    /// Weighted-average acquisition price
    pub average_price: f64,

    /// quantity * average_price
    pub cost_basis: f64,

    /// Latest market price used for valuation
    pub market_price: f64,

    /// quantity * market_price
    pub market_value: f64,

    /// market_value - cost_basis
    pub unrealized_pnl: f64,

    /// Percentage return: (unrealized_pnl / cost_basis) * 100
    pub return_pct: f64,

    /// This position's share of total position value, in percent
    pub allocation_pct: f64,
}
