// ============================================================================
// Domain Models Module
// Catalog, configuration and state of an idle economy
// ============================================================================

pub mod config;
pub mod item;
pub mod state;

pub use config::EconomyConfig;
pub use item::{Catalog, Item, ItemId};
pub use state::{EconomyState, SavedState};
