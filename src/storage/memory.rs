// ============================================================================
// In-Memory Store
// ============================================================================

use crate::domain::SavedState;
use crate::interfaces::Persistence;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct Slot {
    json: Option<String>,
    saves: usize,
}

/// Holds the last save as a JSON string.
///
/// Clones share the same slot, so a test can hand one clone to the economy and
/// inspect the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a save, as if from a previous session
    pub fn with_saved(state: &SavedState) -> Self {
        let mut store = Self::new();
        store.save(state);
        store.slot.lock().saves = 0;
        store
    }

    /// Decoded last save, if any
    pub fn snapshot(&self) -> Option<SavedState> {
        let slot = self.slot.lock();
        slot.json
            .as_deref()
            .and_then(|json| SavedState::from_json(json).ok())
    }

    /// Raw stored JSON
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().json.clone()
    }

    /// Overwrite the stored bytes directly
    pub fn set_raw(&self, json: impl Into<String>) {
        self.slot.lock().json = Some(json.into());
    }

    /// Number of `save` calls since creation
    pub fn save_count(&self) -> usize {
        self.slot.lock().saves
    }

    pub fn clear(&self) {
        self.slot.lock().json = None;
    }
}

impl Persistence for MemoryStore {
    fn save(&mut self, state: &SavedState) {
        let mut slot = self.slot.lock();
        slot.saves += 1;
        match state.to_json() {
            Ok(json) => slot.json = Some(json),
            Err(e) => tracing::warn!("Failed to encode saved state: {}", e),
        }
    }

    fn load(&mut self) -> Option<SavedState> {
        let json = self.raw()?;
        match SavedState::from_json(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Ignoring malformed saved state: {}", e);
                None
            },
        }
    }
}
