use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A held quantity of one commodity plus its average acquisition cost.
///
/// Positions only exist while `quantity > 0`; the ledger removes a
/// position the moment a sell brings it to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Commodity symbol, uppercased (e.g., "GOLD", "CRUDEOIL")
    pub symbol: String,

    /// Units held (always positive)
    pub quantity: f64,

    /// Quantity-weighted average acquisition price across all buys.
    /// Unchanged by sells — the cost basis of the remainder stays put.
    pub average_price: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, quantity: f64, average_price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            quantity,
            average_price,
        }
    }

    /// Total acquisition cost of the holding (`quantity * average_price`).
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.average_price
    }
}

/// Cash balance and open positions for one trading session.
///
/// Mutated only through the ledger; after any committed trade
/// `cash >= 0` and every position has `quantity > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash, debited by buys and credited by sells
    pub cash: f64,

    /// Open positions keyed by uppercase commodity symbol
    pub positions: HashMap<String, Position>,
}

impl Portfolio {
    /// Create a portfolio with a given amount of starting cash and no positions.
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            positions: HashMap::new(),
        }
    }

    /// Look up a position by symbol (case-insensitive).
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(&symbol.to_uppercase())
    }

    /// Units held of a symbol, zero if no position.
    #[must_use]
    pub fn quantity_of(&self, symbol: &str) -> f64 {
        self.position(symbol).map_or(0.0, |p| p.quantity)
    }

    /// Total acquisition cost across all open positions.
    #[must_use]
    pub fn total_cost_basis(&self) -> f64 {
        self.positions.values().map(Position::cost_basis).sum()
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(crate::DEFAULT_STARTING_CASH)
    }
}
