use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::alert::PriceAlert;
use crate::models::market::QuoteCache;
use crate::models::portfolio::Portfolio;
use crate::models::settings::Settings;
use crate::models::trade::TradeLog;
use crate::models::watchlist::Watchlist;

/// Everything that makes up one trading session, in the shape it is
/// persisted: plain JSON-compatible records keyed by session id.
///
/// The quote cache rides along so a reloaded session starts with the
/// last known prices; it is optional in stored data for forward
/// compatibility with records written before caching existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub portfolio: Portfolio,
    pub trades: TradeLog,
    pub watchlist: Watchlist,
    #[serde(default)]
    pub alerts: Vec<PriceAlert>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub quote_cache: QuoteCache,
}

/// Key-value persistence for trading sessions.
///
/// Injected into the facade by the caller: load at session start, save
/// after mutation. Implementations decide where the JSON records live
/// (memory, files, a browser's local storage, ...); durability is the
/// implementation's concern, not this crate's.
pub trait SessionStore {
    /// Load the snapshot for a session, `None` if the session is unknown.
    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>, CoreError>;

    /// Save (insert or overwrite) the snapshot for a session.
    fn save(&mut self, session_id: &str, snapshot: &SessionSnapshot) -> Result<(), CoreError>;

    /// Delete a session's record. Returns `true` if one existed.
    fn delete(&mut self, session_id: &str) -> Result<bool, CoreError>;

    /// All stored session ids, sorted.
    fn list_sessions(&self) -> Result<Vec<String>, CoreError>;
}

/// Validate a session id for use as a storage key.
///
/// Keeps ids portable across store implementations (file names, KV
/// keys): non-empty, at most 64 chars, ASCII alphanumerics plus `-` and
/// `_` only.
pub fn validate_session_id(session_id: &str) -> Result<(), CoreError> {
    if session_id.is_empty() || session_id.len() > 64 {
        return Err(CoreError::InvalidArgument(
            "session id must be 1..=64 characters".into(),
        ));
    }
    if !session_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::InvalidArgument(format!(
            "session id '{session_id}' may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
