// ============================================================================
// Tick Module
// Fixed-step timing and wall-clock sources
// ============================================================================

mod clock;
mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use source::{TickEvent, TickListener, TickSource, MAX_TICK_RATE_HZ};
