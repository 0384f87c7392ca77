use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::alert::{AlertCondition, PriceAlert};

/// Manages price alerts: one alert per commodity, checked against
/// caller-supplied prices.
///
/// Pure business logic over a `Vec<PriceAlert>` — price resolution is
/// the caller's concern, so checking stays synchronous.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Set an alert for a symbol, replacing any existing one.
    /// Returns the new alert's id.
    pub fn set_alert(
        &self,
        alerts: &mut Vec<PriceAlert>,
        symbol: &str,
        condition: AlertCondition,
        target_price: f64,
    ) -> Result<Uuid, CoreError> {
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "alert target price must be a positive number, got {target_price}"
            )));
        }

        let upper = symbol.to_uppercase();
        alerts.retain(|a| a.symbol != upper);

        let alert = PriceAlert::new(upper, condition, target_price);
        let id = alert.id;
        alerts.push(alert);
        Ok(id)
    }

    /// Remove the alert for a symbol. No-op if absent.
    /// Returns `true` if an alert was removed.
    pub fn remove_alert(&self, alerts: &mut Vec<PriceAlert>, symbol: &str) -> bool {
        let upper = symbol.to_uppercase();
        let before = alerts.len();
        alerts.retain(|a| a.symbol != upper);
        alerts.len() != before
    }

    /// The alert for a symbol, if one is set.
    pub fn alert_for<'a>(
        &self,
        alerts: &'a [PriceAlert],
        symbol: &str,
    ) -> Option<&'a PriceAlert> {
        let upper = symbol.to_uppercase();
        alerts.iter().find(|a| a.symbol == upper)
    }

    /// Check all alerts against a map of current prices (keyed by
    /// uppercase symbol). Alerts whose condition is met are marked
    /// triggered and deactivated; the triggered alerts are returned.
    /// Symbols missing from the price map are skipped.
    pub fn check_alerts(
        &self,
        alerts: &mut [PriceAlert],
        prices: &HashMap<String, f64>,
    ) -> Vec<PriceAlert> {
        let mut triggered = Vec::new();

        for alert in alerts.iter_mut() {
            if let Some(&price) = prices.get(&alert.symbol) {
                if alert.is_met(price) {
                    alert.triggered = true;
                    alert.active = false;
                    triggered.push(alert.clone());
                }
            }
        }

        triggered
    }

    /// Drop alerts that have already fired.
    /// Returns the number of alerts removed.
    pub fn clear_triggered(&self, alerts: &mut Vec<PriceAlert>) -> usize {
        let before = alerts.len();
        alerts.retain(|a| !a.triggered);
        before - alerts.len()
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
