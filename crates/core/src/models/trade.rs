use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    /// Acquiring units of a commodity
    Buy,
    /// Disposing of held units
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

/// Immutable record of one executed trade.
///
/// Created only by a successful facade call, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique id, monotonically increasing in creation order (starts at 1)
    pub id: u64,

    /// Commodity symbol, uppercased
    pub symbol: String,

    /// Buy or Sell
    pub side: TradeSide,

    /// Execution price per unit
    pub price: f64,

    /// Units traded (always positive)
    pub quantity: f64,

    /// `price * quantity`, stored at creation time
    pub total: f64,

    /// Execution time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Append-only trade history, newest first.
///
/// Owns the id sequence: ids are assigned at append time and keep
/// increasing across save/load because the counter is serialized too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLog {
    trades: Vec<Trade>,
    next_id: u64,
}

impl TradeLog {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            next_id: 1,
        }
    }

    /// Record an executed trade at the front of the history.
    /// Returns a reference to the stored record.
    pub fn record(
        &mut self,
        symbol: impl Into<String>,
        side: TradeSide,
        quantity: f64,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> &Trade {
        let trade = Trade {
            id: self.next_id,
            symbol: symbol.into().to_uppercase(),
            side,
            price,
            quantity,
            total: price * quantity,
            timestamp,
        };
        self.next_id += 1;
        self.trades.insert(0, trade);
        &self.trades[0]
    }

    /// Full history, most recent first.
    #[must_use]
    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    /// The most recently executed trade, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Trade> {
        self.trades.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Trades for one commodity, most recent first.
    #[must_use]
    pub fn for_symbol(&self, symbol: &str) -> Vec<&Trade> {
        let upper = symbol.to_uppercase();
        self.trades.iter().filter(|t| t.symbol == upper).collect()
    }

    /// Trades of one side, most recent first.
    #[must_use]
    pub fn by_side(&self, side: TradeSide) -> Vec<&Trade> {
        self.trades.iter().filter(|t| t.side == side).collect()
    }

    /// The id the next recorded trade will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl Default for TradeLog {
    fn default() -> Self {
        Self::new()
    }
}
