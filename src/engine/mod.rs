// ============================================================================
// Engine Module
// Contains the economy rules, pricing and the tick-driven game session
// ============================================================================

mod economy;
mod errors;
mod game;
mod pricing;

pub mod factory;

pub use economy::Economy;
pub use errors::{EconomyError, EconomyResult};
pub use factory::{create_from_config, EconomyBuilder};
pub use game::Game;
pub use pricing::{sum_unit_prices, PriceSchedule};
