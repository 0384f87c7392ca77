use crate::errors::CoreError;
use crate::models::portfolio::{Portfolio, Position};
use crate::models::trade::TradeSide;

/// Applies trades to a portfolio: cash accounting, position tracking,
/// weighted-average cost recalculation.
///
/// Pure business logic — no I/O, no API calls. Every check runs before
/// any mutation, so a failed trade leaves the portfolio untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a trade would be accepted, without applying it.
    ///
    /// Rules:
    /// - Quantity and price must be positive finite numbers
    /// - A buy must not cost more than the available cash
    /// - A sell needs an open position holding at least the quantity
    pub fn validate_trade(
        &self,
        portfolio: &Portfolio,
        symbol: &str,
        side: TradeSide,
        quantity: f64,
        price: f64,
    ) -> Result<(), CoreError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "quantity must be a positive number, got {quantity}"
            )));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "price must be a positive number, got {price}"
            )));
        }

        let total = price * quantity;
        match side {
            TradeSide::Buy => {
                if total > portfolio.cash {
                    return Err(CoreError::InsufficientCash {
                        required: total,
                        available: portfolio.cash,
                    });
                }
            }
            TradeSide::Sell => {
                let upper = symbol.to_uppercase();
                let position = portfolio
                    .positions
                    .get(&upper)
                    .ok_or_else(|| CoreError::NoPosition(upper.clone()))?;
                if position.quantity < quantity {
                    return Err(CoreError::InsufficientQuantity {
                        symbol: upper,
                        requested: quantity,
                        held: position.quantity,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate and apply a trade to the portfolio.
    ///
    /// Buy: debit `price * quantity` from cash and fold the units into
    /// the position, recomputing the quantity-weighted average price. A
    /// first buy creates the position at the execution price, which is
    /// what the weighted-average formula yields for an empty holding.
    ///
    /// Sell: credit `price * quantity` to cash and reduce the position;
    /// the average price of the remainder is unchanged. A position sold
    /// down to zero is removed.
    pub fn apply_trade(
        &self,
        portfolio: &mut Portfolio,
        symbol: &str,
        side: TradeSide,
        quantity: f64,
        price: f64,
    ) -> Result<(), CoreError> {
        self.validate_trade(portfolio, symbol, side, quantity, price)?;

        let upper = symbol.to_uppercase();
        let total = price * quantity;

        match side {
            TradeSide::Buy => {
                portfolio.cash -= total;
                match portfolio.positions.get_mut(&upper) {
                    Some(position) => {
                        let combined_cost = position.quantity * position.average_price + total;
                        position.quantity += quantity;
                        position.average_price = combined_cost / position.quantity;
                    }
                    None => {
                        portfolio
                            .positions
                            .insert(upper.clone(), Position::new(upper, quantity, price));
                    }
                }
            }
            TradeSide::Sell => {
                portfolio.cash += total;
                // validate_trade guarantees the position exists and holds enough
                if let Some(position) = portfolio.positions.get_mut(&upper) {
                    position.quantity -= quantity;
                    if position.quantity <= f64::EPSILON {
                        portfolio.positions.remove(&upper);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
