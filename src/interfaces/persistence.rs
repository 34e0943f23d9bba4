// ============================================================================
// Persistence Interface
// Defines the contract for saving and restoring economy state
// ============================================================================

use crate::domain::SavedState;

/// Storage collaborator the economy saves to and loads from.
///
/// The economy calls `load` once when it is constructed and `save` after
/// purchases, manual accruals and every Nth tick. Saving is fire-and-forget:
/// failures belong to the implementation, which should log and carry on.
pub trait Persistence: Send {
    /// Store a snapshot
    fn save(&mut self, state: &SavedState);

    /// Fetch the last snapshot; `None` means start fresh
    fn load(&mut self) -> Option<SavedState>;
}

/// Persistence that never stores anything
pub struct NoOpPersistence;

impl Persistence for NoOpPersistence {
    fn save(&mut self, _state: &SavedState) {
        // Do nothing
    }

    fn load(&mut self) -> Option<SavedState> {
        None
    }
}
