use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-configurable settings, persisted inside the session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Cash a brand new session starts with.
    pub starting_cash: f64,

    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "api_ninjas").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_cash: crate::DEFAULT_STARTING_CASH,
            api_keys: HashMap::new(),
        }
    }
}
