use chrono::Utc;

use crate::errors::CoreError;
use crate::models::analytics::{HoldingSummary, PortfolioSummary};
use crate::models::commodity::CommodityCatalog;
use crate::models::market::QuoteCache;
use crate::models::portfolio::Portfolio;
use crate::models::trade::TradeLog;
use crate::services::market_service::MarketService;

/// Computes portfolio analytics: market value, unrealized P&L, returns,
/// allocation breakdown.
///
/// Positions are valued at the latest market price (live or cached);
/// cost basis comes from the ledger's weighted-average price.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Value every open position and aggregate portfolio totals.
    ///
    /// Fails if no price source can quote one of the held symbols.
    pub async fn portfolio_summary(
        &self,
        portfolio: &Portfolio,
        trades: &TradeLog,
        catalog: &CommodityCatalog,
        market_service: &MarketService,
        quote_cache: &mut QuoteCache,
    ) -> Result<PortfolioSummary, CoreError> {
        let mut holdings = Vec::with_capacity(portfolio.positions.len());
        let mut market_value = 0.0;
        let mut cost_basis = 0.0;

        for position in portfolio.positions.values() {
            let market_price = market_service
                .get_price(quote_cache, &position.symbol)
                .await?;

            let value = position.quantity * market_price;
            let basis = position.cost_basis();
            let pnl = value - basis;

            market_value += value;
            cost_basis += basis;

            let listed = catalog.find(&position.symbol);

            holdings.push(HoldingSummary {
                symbol: position.symbol.clone(),
                name: listed.map(|c| c.name.clone()),
                category: listed.map(|c| c.category),
                quantity: position.quantity,
                average_price: position.average_price,
                cost_basis: basis,
                market_price,
                market_value: value,
                unrealized_pnl: pnl,
                return_pct: if basis > 0.0 { (pnl / basis) * 100.0 } else { 0.0 },
                allocation_pct: 0.0, // filled below once the total is known
            });
        }

        for holding in &mut holdings {
            holding.allocation_pct = if market_value > 0.0 {
                (holding.market_value / market_value) * 100.0
            } else {
                0.0
            };
        }

        // Largest allocation first
        holdings.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let unrealized_pnl = market_value - cost_basis;

        Ok(PortfolioSummary {
            as_of: Utc::now(),
            cash: portfolio.cash,
            market_value,
            total_value: portfolio.cash + market_value,
            cost_basis,
            unrealized_pnl,
            return_pct: if cost_basis > 0.0 {
                (unrealized_pnl / cost_basis) * 100.0
            } else {
                0.0
            },
            trade_count: trades.len(),
            holdings,
        })
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
