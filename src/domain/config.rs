// ============================================================================
// Economy Configuration
// Tunable parameters for pricing, tick rate and save throttling
// ============================================================================

use crate::tick::MAX_TICK_RATE_HZ;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

const DEFAULT_TICK_RATE: NonZeroU32 = match NonZeroU32::new(30) {
    Some(rate) => rate,
    None => panic!("tick rate must be non-zero"),
};

/// Comprehensive configuration for an economy.
///
/// In JSON every field is optional. A missing save interval follows the
/// tick rate, the same as [`with_tick_rate`](Self::with_tick_rate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct EconomyConfig {
    /// Logical ticks per second
    pub tick_rate_hz: NonZeroU32,

    /// Price multiplier applied once per unit already owned
    pub growth_factor: f64,

    /// Save after every this many applied ticks
    pub save_interval_ticks: NonZeroU32,
}

impl Default for EconomyConfig {
    /// 30 Hz, 15% price growth, save about once a second
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE,
            growth_factor: 1.15,
            save_interval_ticks: DEFAULT_TICK_RATE,
        }
    }
}

/// JSON form with every field optional
#[derive(Deserialize)]
struct ConfigFile {
    tick_rate_hz: Option<NonZeroU32>,
    growth_factor: Option<f64>,
    save_interval_ticks: Option<NonZeroU32>,
}

impl From<ConfigFile> for EconomyConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let tick_rate_hz = file.tick_rate_hz.unwrap_or(defaults.tick_rate_hz);

        Self {
            tick_rate_hz,
            growth_factor: file.growth_factor.unwrap_or(defaults.growth_factor),
            save_interval_ticks: file.save_interval_ticks.unwrap_or(tick_rate_hz),
        }
    }
}

impl EconomyConfig {
    /// Preset: 50% price growth per owned unit
    pub fn steep() -> Self {
        Self::default().with_growth_factor(1.5)
    }

    /// Builder method: Set tick rate (the save interval follows it)
    pub fn with_tick_rate(mut self, tick_rate_hz: NonZeroU32) -> Self {
        self.tick_rate_hz = tick_rate_hz;
        self.save_interval_ticks = tick_rate_hz;
        self
    }

    /// Builder method: Set price growth factor
    pub fn with_growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Builder method: Set how many ticks pass between saves
    pub fn with_save_interval(mut self, ticks: NonZeroU32) -> Self {
        self.save_interval_ticks = ticks;
        self
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.growth_factor.is_finite() {
            return Err("Growth factor must be finite".to_string());
        }

        if self.growth_factor <= 1.0 {
            return Err(format!(
                "Growth factor must be greater than 1, got {}",
                self.growth_factor
            ));
        }

        if self.tick_rate_hz.get() > MAX_TICK_RATE_HZ {
            return Err(format!(
                "Tick rate must be at most {} Hz, got {}",
                MAX_TICK_RATE_HZ, self.tick_rate_hz
            ));
        }

        Ok(())
    }
}
