use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use super::store::{validate_session_id, SessionSnapshot, SessionStore};

/// File-backed session store: one `<session_id>.json` per session in a
/// directory (native only).
///
/// Records are pretty-printed JSON so they stay inspectable and
/// hand-editable. The directory is created on first save.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory session files live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>, CoreError> {
        validate_session_id(session_id)?;
        let path = self.path_for(session_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, session_id: &str, snapshot: &SessionSnapshot) -> Result<(), CoreError> {
        validate_session_id(session_id)?;
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize session: {e}")))?;
        std::fs::write(self.path_for(session_id), json)?;
        Ok(())
    }

    fn delete(&mut self, session_id: &str) -> Result<bool, CoreError> {
        validate_session_id(session_id)?;
        let path = self.path_for(session_id);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    fn list_sessions(&self) -> Result<Vec<String>, CoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
