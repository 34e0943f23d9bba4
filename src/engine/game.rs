// ============================================================================
// Game
// Binds one economy to one tick source for a frame-driven host loop
// ============================================================================

use super::economy::Economy;
use super::errors::EconomyResult;
use crate::numeric::Currency;
use crate::tick::{TickEvent, TickListener, TickSource};
use std::time::Instant;

type Observer = Box<dyn FnMut(TickEvent)>;

/// Routes each tick event to the economy first, then to UI observers
struct Dispatch<'a> {
    economy: &'a mut Economy,
    observers: &'a mut [Observer],
}

impl TickListener for Dispatch<'_> {
    fn on_tick_event(&mut self, event: TickEvent) {
        self.economy.on_tick_event(event);
        for observer in self.observers.iter_mut() {
            observer(event);
        }
    }
}

/// A running session: the economy plus the clock that drives it.
///
/// The host calls [`frame`](Self::frame) from its render loop with the current
/// instant; everything else is plain method calls on the same thread.
pub struct Game {
    economy: Economy,
    ticker: TickSource,
    observers: Vec<Observer>,
}

impl Game {
    pub fn new(economy: Economy) -> Self {
        let ticker = TickSource::new(economy.config().tick_rate_hz);
        Self {
            economy,
            ticker,
            observers: Vec::new(),
        }
    }

    /// Register a callback for every start, tick and stop event
    pub fn subscribe(&mut self, observer: impl FnMut(TickEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start ticking. Returns false if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        let mut dispatch = Dispatch {
            economy: &mut self.economy,
            observers: &mut self.observers,
        };
        self.ticker.start(now, &mut dispatch)
    }

    /// Stop ticking. No tick is delivered after this returns.
    pub fn stop(&mut self) -> bool {
        let mut dispatch = Dispatch {
            economy: &mut self.economy,
            observers: &mut self.observers,
        };
        self.ticker.stop(&mut dispatch)
    }

    /// Host frame callback. Returns the number of ticks applied.
    pub fn frame(&mut self, now: Instant) -> u64 {
        let mut dispatch = Dispatch {
            economy: &mut self.economy,
            observers: &mut self.observers,
        };
        self.ticker.pump(now, &mut dispatch)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    // ========================================================================
    // UI Surface
    // ========================================================================

    pub fn purchase(&mut self, name: &str, n: u64) -> EconomyResult<()> {
        self.economy.purchase(name, n)
    }

    /// Manual click
    pub fn click(&mut self) -> Currency {
        self.economy.apply_manual_accrual()
    }

    pub fn balance_display(&self, scientific: bool) -> String {
        self.economy.balance_display(scientific)
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn economy_mut(&mut self) -> &mut Economy {
        &mut self.economy
    }

    pub fn ticker(&self) -> &TickSource {
        &self.ticker
    }

    pub fn into_economy(self) -> Economy {
        self.economy
    }
}
