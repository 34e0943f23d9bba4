// ============================================================================
// Economy Factory
// Creates economies and game sessions with their collaborators wired in
// ============================================================================

use super::economy::Economy;
use super::game::Game;
use crate::domain::{Catalog, EconomyConfig};
use crate::interfaces::{EventHandler, NoOpEventHandler, NoOpPersistence, Persistence};
use crate::tick::{Clock, SystemClock};
use std::num::NonZeroU32;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an economy over the standard catalog from configuration
///
/// # Arguments
/// * `config` - Economy configuration
/// * `persistence` - Save/load collaborator
/// * `event_handler` - Event handler for economy events
///
/// # Returns
/// * `Result<Economy, String>` - Configured economy or validation error
///
/// # Example
/// ```
/// use idle_economy::prelude::*;
/// use idle_economy::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let economy = create_from_config(
///     EconomyConfig::default(),
///     Box::new(NoOpPersistence),
///     Arc::new(NoOpEventHandler),
/// )
/// .unwrap();
/// assert_eq!(economy.balance_display(false), "0.00");
/// ```
pub fn create_from_config(
    config: EconomyConfig,
    persistence: Box<dyn Persistence>,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Economy, String> {
    config.validate()?;

    Ok(Economy::new(
        config,
        Arc::new(Catalog::standard()),
        persistence,
        event_handler,
        Arc::new(SystemClock),
    ))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating economies with fluent API
///
/// # Example
/// ```
/// use idle_economy::prelude::*;
/// use std::num::NonZeroU32;
///
/// let mut game = EconomyBuilder::new()
///     .tick_rate(NonZeroU32::new(60).unwrap())
///     .growth_factor(1.5)
///     .with_persistence(MemoryStore::new())
///     .build_game()
///     .unwrap();
///
/// game.click();
/// assert_eq!(game.balance_display(false), "1.00");
/// ```
pub struct EconomyBuilder {
    config: EconomyConfig,
    catalog: Arc<Catalog>,
    persistence: Box<dyn Persistence>,
    event_handler: Arc<dyn EventHandler>,
    clock: Arc<dyn Clock>,
}

impl EconomyBuilder {
    /// Create a builder with default tunables, the standard catalog and no-op collaborators
    pub fn new() -> Self {
        Self {
            config: EconomyConfig::default(),
            catalog: Arc::new(Catalog::standard()),
            persistence: Box::new(NoOpPersistence),
            event_handler: Arc::new(NoOpEventHandler),
            clock: Arc::new(SystemClock),
        }
    }

    // ========================================================================
    // Tunables
    // ========================================================================

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EconomyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set ticks per second. Also resets the save interval to one save per second.
    pub fn tick_rate(mut self, hz: NonZeroU32) -> Self {
        self.config = self.config.with_tick_rate(hz);
        self
    }

    /// Set the per-unit price multiplier
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.config = self.config.with_growth_factor(growth_factor);
        self
    }

    /// Save once every `ticks` ticks
    pub fn save_interval(mut self, ticks: NonZeroU32) -> Self {
        self.config = self.config.with_save_interval(ticks);
        self
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    pub fn with_catalog(self, catalog: Catalog) -> Self {
        self.with_shared_catalog(Arc::new(catalog))
    }

    /// Share one catalog between several economies
    pub fn with_shared_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_persistence(mut self, persistence: impl Persistence + 'static) -> Self {
        self.persistence = Box::new(persistence);
        self
    }

    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the economy. Loads the saved state, if any, before returning.
    pub fn build(self) -> Result<Economy, String> {
        self.config.validate()?;

        Ok(Economy::new(
            self.config,
            self.catalog,
            self.persistence,
            self.event_handler,
            self.clock,
        ))
    }

    /// Build the economy and bind it to a tick source at the configured rate
    pub fn build_game(self) -> Result<Game, String> {
        self.build().map(Game::new)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EconomyConfig {
        &self.config
    }
}

impl Default for EconomyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
