use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trigger direction for a price alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCondition {
    /// Fires when the price reaches or exceeds the target
    Above,
    /// Fires when the price drops to or below the target
    Below,
}

impl std::fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertCondition::Above => write!(f, "Above"),
            AlertCondition::Below => write!(f, "Below"),
        }
    }
}

/// A price alert on one commodity.
///
/// At most one alert exists per symbol; setting a new one replaces the
/// old. Once triggered an alert stays in the list (inactive) until
/// explicitly cleared, so the UI can show what fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Unique identifier
    pub id: Uuid,

    /// Commodity symbol, uppercased
    pub symbol: String,

    /// Trigger direction
    pub condition: AlertCondition,

    /// Price level that arms the trigger
    pub target_price: f64,

    /// Inactive alerts are skipped during checks
    pub active: bool,

    /// Set once the alert has fired
    pub triggered: bool,

    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    pub fn new(symbol: impl Into<String>, condition: AlertCondition, target_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            condition,
            target_price,
            active: true,
            triggered: false,
            created_at: Utc::now(),
        }
    }

    /// Whether a live price satisfies this alert right now.
    /// Inactive or already-triggered alerts never match.
    #[must_use]
    pub fn is_met(&self, price: f64) -> bool {
        if !self.active || self.triggered {
            return false;
        }
        match self.condition {
            AlertCondition::Above => price >= self.target_price,
            AlertCondition::Below => price <= self.target_price,
        }
    }
}
