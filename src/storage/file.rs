// ============================================================================
// File Store
// JSON save file on local disk
// ============================================================================

use super::StorageError;
use crate::domain::SavedState;
use crate::interfaces::Persistence;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Saves to a single JSON file, replacing it atomically via a sibling temp file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the save file, reporting failures
    pub fn try_save(&self, state: &SavedState) -> Result<(), StorageError> {
        let json = state.to_json()?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the save file; a missing file is `Ok(None)`
    pub fn try_load(&self) -> Result<Option<SavedState>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(SavedState::from_json(&json)?))
    }
}

impl Persistence for FileStore {
    fn save(&mut self, state: &SavedState) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!("Failed to save to {}: {}", self.path.display(), e);
        }
    }

    fn load(&mut self) -> Option<SavedState> {
        match self.try_load() {
            Ok(state) => {
                if state.is_none() {
                    tracing::debug!("No save file at {}", self.path.display());
                }
                state
            },
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", self.path.display(), e);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "idle-economy-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_missing_file_is_fresh_start() {
        let mut store = FileStore::new(temp_path("missing"));
        assert!(store.try_load().unwrap().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let path = temp_path("round-trip");
        let mut store = FileStore::new(&path);
        let state = SavedState {
            balance: "98765432109876543210.0123456789".parse().unwrap(),
            owned: BTreeMap::from([("ring".to_string(), 7)]),
            last_update_ms: Some(1_700_000_000_123),
        };

        store.save(&state);
        assert_eq!(store.load(), Some(state));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_reports_decode_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.try_load(), Err(StorageError::Decode(_))));
        assert!(store.load().is_none());

        let _ = fs::remove_file(path);
    }
}
