pub mod alert_service;
pub mod analytics_service;
pub mod ledger_service;
pub mod market_service;
