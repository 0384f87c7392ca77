use std::collections::HashMap;

use crate::errors::CoreError;
use super::store::{validate_session_id, SessionSnapshot, SessionStore};

/// In-memory session store: a map of session id to JSON record.
///
/// Fills the role a browser's local storage plays for the dashboard —
/// snapshots are stored as serialized JSON strings, so a round trip
/// through this store exercises exactly the persistence format any
/// other key-value backend would see. Contents are lost when the store
/// is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw JSON record for a session, if present.
    #[must_use]
    pub fn raw_record(&self, session_id: &str) -> Option<&str> {
        self.entries.get(session_id).map(String::as_str)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>, CoreError> {
        validate_session_id(session_id)?;
        match self.entries.get(session_id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, session_id: &str, snapshot: &SessionSnapshot) -> Result<(), CoreError> {
        validate_session_id(session_id)?;
        let json = serde_json::to_string(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize session: {e}")))?;
        self.entries.insert(session_id.to_string(), json);
        Ok(())
    }

    fn delete(&mut self, session_id: &str) -> Result<bool, CoreError> {
        validate_session_id(session_id)?;
        Ok(self.entries.remove(session_id).is_some())
    }

    fn list_sessions(&self) -> Result<Vec<String>, CoreError> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
