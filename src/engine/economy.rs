// ============================================================================
// Economy
// Core business logic: production, pricing, purchases and accrual
// ============================================================================

use super::errors::{EconomyError, EconomyResult};
use super::pricing::PriceSchedule;
use crate::domain::{Catalog, EconomyConfig, EconomyState, ItemId, SavedState};
use crate::interfaces::{EconomyEvent, EventHandler, Persistence};
use crate::numeric::Currency;
use crate::tick::{Clock, TickEvent, TickListener};
use std::num::{NonZeroU32, NonZeroU64};
use std::sync::Arc;

const MILLIS_PER_SECOND: NonZeroU64 = match NonZeroU64::new(1_000) {
    Some(n) => n,
    None => panic!("non-zero"),
};

/// Balance, owned items and the rules that move them.
///
/// All mutation happens synchronously on the caller's thread, either from a
/// user action or from a tick delivered through [`TickListener`].
pub struct Economy {
    /// Tunables (tick rate, growth factor, save interval)
    config: EconomyConfig,

    /// Static item definitions
    catalog: Arc<Catalog>,

    /// Geometric price schedule built from the growth factor
    prices: PriceSchedule,

    /// Mutable model
    state: EconomyState,

    /// Injected save/load collaborator
    persistence: Box<dyn Persistence>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,

    /// Wall clock for timestamps and offline accrual
    clock: Arc<dyn Clock>,

    /// Mirrors the tick source lifecycle
    running: bool,

    /// Ticks applied since construction, drives the save throttle
    ticks_applied: u64,
}

impl Economy {
    /// Create an economy, restoring the last save if there is one.
    ///
    /// A restored save with a timestamp is credited for the time elapsed since
    /// then, at the restored production rate.
    pub fn new(
        config: EconomyConfig,
        catalog: Arc<Catalog>,
        mut persistence: Box<dyn Persistence>,
        event_handler: Arc<dyn EventHandler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let loaded = persistence.load();

        let mut economy = Self {
            prices: PriceSchedule::new(config.growth_factor),
            config,
            catalog,
            state: EconomyState::fresh(now),
            persistence,
            event_handler,
            clock,
            running: false,
            ticks_applied: 0,
        };

        match loaded {
            Some(saved) => {
                economy.state = EconomyState::from_saved(saved, &economy.catalog);
                tracing::info!(
                    "Restored saved state with balance {}",
                    economy.state.balance().to_display_string()
                );

                if let Some(last_update) = economy.state.last_update() {
                    let elapsed_ms = (now - last_update).num_milliseconds().max(0) as u64;
                    economy.apply_offline_accrual(elapsed_ms);
                }
                economy.state.touch(now);
            },
            None => tracing::info!("No saved state, starting fresh"),
        }

        economy
    }

    // ========================================================================
    // Read Surface
    // ========================================================================

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn balance(&self) -> &Currency {
        self.state.balance()
    }

    /// Balance for display, two decimals or scientific above 1000
    pub fn balance_display(&self, scientific: bool) -> String {
        if scientific {
            self.state.balance().to_scientific_string()
        } else {
            self.state.balance().to_display_string()
        }
    }

    /// Owned count by name; unknown names own nothing
    pub fn owned_count(&self, name: &str) -> u64 {
        self.catalog
            .find(name)
            .map_or(0, |id| self.state.owned(id))
    }

    pub fn owned_count_by_id(&self, id: ItemId) -> u64 {
        self.state.owned(id)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }

    /// Current state in persisted form
    pub fn saved_state(&self) -> SavedState {
        self.state.to_saved(&self.catalog)
    }

    // ========================================================================
    // Production
    // ========================================================================

    /// Currency per second from everything owned
    pub fn production_rate(&self) -> Currency {
        self.state
            .owned_iter()
            .filter_map(|(id, count)| {
                self.catalog
                    .get(id)
                    .map(|item| item.production_rate.mul_int(count))
            })
            .sum()
    }

    pub fn production_per_tick(&self, tick_rate_hz: NonZeroU32) -> Currency {
        self.production_rate().div_int(NonZeroU64::from(tick_rate_hz))
    }

    // ========================================================================
    // Pricing
    // ========================================================================

    /// Price of unit number `existing` (zero-based) of an item
    pub fn price_for_nth_unit(&self, name: &str, existing: u64) -> Option<Currency> {
        let id = self.catalog.find(name)?;
        self.price_for_nth_unit_by_id(id, existing)
    }

    pub fn price_for_nth_unit_by_id(&self, id: ItemId, existing: u64) -> Option<Currency> {
        let item = self.catalog.get(id)?;
        self.prices.unit_price(&item.base_cost, existing)
    }

    /// Price of the next `n` units given what is owned now.
    ///
    /// Unknown items price at zero; a unit that cannot be priced ends the sum.
    pub fn price_for_n_units(&self, name: &str, n: u64) -> Currency {
        match self.catalog.find(name) {
            Some(id) => self.price_for_n_units_by_id(id, n),
            None => Currency::zero(),
        }
    }

    pub fn price_for_n_units_by_id(&self, id: ItemId, n: u64) -> Currency {
        match self.catalog.get(id) {
            Some(item) => self
                .prices
                .batch_price(&item.base_cost, self.state.owned(id), n),
            None => Currency::zero(),
        }
    }

    /// Whether the next `n` units are affordable; never for unknown items
    pub fn can_afford(&self, name: &str, n: u64) -> bool {
        self.catalog
            .find(name)
            .is_some_and(|id| self.can_afford_by_id(id, n))
    }

    pub fn can_afford_by_id(&self, id: ItemId, n: u64) -> bool {
        self.price_within_balance(id, n).is_ok()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Buy `n` units of an item and save.
    ///
    /// If the batch price is cut short because some unit's multiplier
    /// overflows `f64`, the price is the sum up to that unit and every unit
    /// from there on is free; all `n` units are still added.
    ///
    /// # Errors
    /// - `UnknownItem` if no item has this name
    /// - `InsufficientFunds` if the balance is below the batch price.
    ///   `required` is the running total at the first unit that overshot the
    ///   balance, so it can be below the full batch price.
    ///
    /// Nothing changes when an error is returned.
    pub fn purchase(&mut self, name: &str, n: u64) -> EconomyResult<()> {
        let Some(id) = self.catalog.find(name) else {
            let err = EconomyError::UnknownItem(name.to_string());
            self.reject_purchase(name, n, &err);
            return Err(err);
        };

        let price = match self.price_within_balance(id, n) {
            Ok(price) if self.state.debit(&price) => price,
            Ok(required) | Err(required) => {
                let err = EconomyError::InsufficientFunds {
                    required,
                    available: self.state.balance().clone(),
                };
                self.reject_purchase(name, n, &err);
                return Err(err);
            },
        };

        self.state.add_owned(id, n);
        tracing::debug!(
            "Bought {} x {} for {}",
            n,
            name,
            price.to_display_string()
        );

        self.event_handler.on_event(EconomyEvent::Purchased {
            item: name.to_string(),
            quantity: n,
            cost: price,
            timestamp: self.clock.now(),
        });
        self.save();
        Ok(())
    }

    /// Manual click: credit the production rate, but never less than one
    /// whole unit. Saves. Returns the amount credited.
    pub fn apply_manual_accrual(&mut self) -> Currency {
        let amount = self.production_rate().max(Currency::one());
        self.state.credit(&amount);

        self.event_handler.on_event(EconomyEvent::ManualAccrual {
            amount: amount.clone(),
            timestamp: self.clock.now(),
        });
        self.save();
        amount
    }

    /// One logical tick of production. Saves every `save_interval_ticks`
    /// applied ticks.
    pub fn apply_tick_accrual(&mut self, tick_rate_hz: NonZeroU32) {
        let amount = self.production_per_tick(tick_rate_hz);
        self.state.credit(&amount);
        self.state.touch(self.clock.now());

        self.ticks_applied += 1;
        if self.ticks_applied % u64::from(self.config.save_interval_ticks.get()) == 0 {
            self.save();
        }
    }

    /// Credit production for time the game was not running, at the current
    /// rate. Returns the amount credited.
    pub fn apply_offline_accrual(&mut self, elapsed_ms: u64) -> Currency {
        let amount = self
            .production_rate()
            .mul_int(elapsed_ms)
            .div_int(MILLIS_PER_SECOND);
        self.state.credit(&amount);

        tracing::info!(
            "Credited {} for {} ms offline",
            amount.to_display_string(),
            elapsed_ms
        );
        self.event_handler.on_event(EconomyEvent::OfflineAccrual {
            elapsed_ms,
            amount: amount.clone(),
            timestamp: self.clock.now(),
        });
        amount
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Batch price for `n` more units, given up once it passes the balance
    fn price_within_balance(&self, id: ItemId, n: u64) -> Result<Currency, Currency> {
        match self.catalog.get(id) {
            Some(item) => self.prices.batch_price_within(
                &item.base_cost,
                self.state.owned(id),
                n,
                self.state.balance(),
            ),
            None => Ok(Currency::zero()),
        }
    }

    fn reject_purchase(&self, name: &str, n: u64, err: &EconomyError) {
        tracing::debug!("Purchase of {} x {} rejected: {}", n, name, err);
        self.event_handler.on_event(EconomyEvent::PurchaseRejected {
            item: name.to_string(),
            quantity: n,
            reason: err.to_string(),
            timestamp: self.clock.now(),
        });
    }

    fn save(&mut self) {
        let saved = self.state.to_saved(&self.catalog);
        self.persistence.save(&saved);
        self.event_handler.on_event(EconomyEvent::Saved {
            timestamp: self.clock.now(),
        });
    }
}

impl TickListener for Economy {
    fn on_tick_event(&mut self, event: TickEvent) {
        match event {
            TickEvent::Start => {
                self.running = true;
                tracing::info!("Economy running");
                self.event_handler.on_event(EconomyEvent::Started {
                    timestamp: self.clock.now(),
                });
            },
            TickEvent::Tick { .. } => self.apply_tick_accrual(self.config.tick_rate_hz),
            TickEvent::Stop => {
                self.running = false;
                tracing::info!("Economy stopped after {} ticks", self.ticks_applied);
                self.event_handler.on_event(EconomyEvent::Stopped {
                    timestamp: self.clock.now(),
                });
            },
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::interfaces::NoOpEventHandler;
    use crate::storage::MemoryStore;
    use crate::tick::ManualClock;
    use chrono::Utc;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Action {
        Click,
        Tick,
        Buy(usize, u64),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            3 => Just(Action::Click),
            3 => Just(Action::Tick),
            4 => (0usize..4, 0u64..4).prop_map(|(item, n)| Action::Buy(item, n)),
        ]
    }

    proptest! {
        #[test]
        fn balance_never_negative(actions in proptest::collection::vec(action(), 0..200)) {
            let catalog = Catalog::standard();
            let names: Vec<String> = catalog.iter().map(|(_, item)| item.name.clone()).collect();
            let mut economy = Economy::new(
                EconomyConfig::default(),
                Arc::new(catalog),
                Box::new(MemoryStore::new()),
                Arc::new(NoOpEventHandler),
                Arc::new(ManualClock::new(Utc::now())),
            );
            let hz = economy.config().tick_rate_hz;

            for action in actions {
                match action {
                    Action::Click => {
                        economy.apply_manual_accrual();
                    },
                    Action::Tick => economy.apply_tick_accrual(hz),
                    Action::Buy(item, n) => {
                        let name = &names[item];
                        let before_balance = economy.balance().clone();
                        let before_owned = economy.owned_count(name);
                        let affordable = economy.can_afford(name, n);

                        let result = economy.purchase(name, n);
                        prop_assert_eq!(result.is_ok(), affordable);
                        if result.is_err() {
                            prop_assert_eq!(economy.balance(), &before_balance);
                            prop_assert_eq!(economy.owned_count(name), before_owned);
                        } else {
                            prop_assert_eq!(economy.owned_count(name), before_owned + n);
                        }
                    },
                }
                prop_assert!(!economy.balance().is_negative());
            }
        }
    }
}
