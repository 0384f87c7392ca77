use thiserror::Error;

/// Unified error type for the entire commodity-desk-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger / Trading ────────────────────────────────────────────
    #[error("Invalid trade argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient cash: trade total {required:.2} exceeds available cash {available:.2}")]
    InsufficientCash {
        required: f64,
        available: f64,
    },

    #[error("No open position in {0}")]
    NoPosition(String),

    #[error("Cannot sell {requested} {symbol} — only {held} held")]
    InsufficientQuantity {
        symbol: String,
        requested: f64,
        held: f64,
    },

    // ── Market data / API ───────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No price source available for {0}")]
    NoProvider(String),

    #[error("Price not available for {symbol}")]
    PriceNotAvailable {
        symbol: String,
    },

    #[error("Unknown commodity: {0}")]
    UnknownCommodity(String),

    // ── Storage / Persistence ───────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
