// ============================================================================
// Idle Economy Library
// Arbitrary-precision currency, geometric pricing and a fixed-rate tick loop
// ============================================================================

//! # Idle Economy
//!
//! The model behind an incremental "idle" game: a balance that grows from
//! owned producers, items whose price rises with every unit bought, and a
//! fixed-rate tick loop that keeps production independent of frame rate.
//!
//! ## Features
//!
//! - **Exact currency** on an arbitrary-precision fixed-point decimal
//! - **Geometric pricing** per unit, with batch quotes
//! - **Fixed-step ticks** that catch up after stalls without dropping work
//! - **Injected persistence** with offline accrual on reload
//! - **Event sourcing** for UI updates and audit trail
//!
//! ## Example
//!
//! ```rust
//! use idle_economy::prelude::*;
//! use std::time::{Duration, Instant};
//!
//! let mut game = EconomyBuilder::new()
//!     .with_persistence(MemoryStore::new())
//!     .build_game()
//!     .unwrap();
//!
//! // Earn enough for a sword by hand
//! for _ in 0..6 {
//!     game.click();
//! }
//! game.purchase("sword", 1).unwrap();
//! assert_eq!(game.balance_display(false), "0.00");
//!
//! // One second of ticks at 0.1 per second
//! let t0 = Instant::now();
//! game.start(t0);
//! game.frame(t0 + Duration::from_secs(1));
//! println!("Balance: {}", game.balance_display(true));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod storage;
pub mod tick;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{Catalog, EconomyConfig, EconomyState, Item, ItemId, SavedState};
    pub use crate::engine::{
        create_from_config, Economy, EconomyBuilder, EconomyError, EconomyResult, Game,
        PriceSchedule,
    };
    pub use crate::interfaces::{
        EconomyEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, NoOpPersistence,
        Persistence, RecordingEventHandler,
    };
    pub use crate::numeric::{Currency, Decimal, NumericError};
    pub use crate::storage::{FileStore, MemoryStore, StorageError};
    pub use crate::tick::{Clock, ManualClock, SystemClock, TickEvent, TickListener, TickSource};
}
