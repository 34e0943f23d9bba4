// ============================================================================
// Tick Source
// Fixed-step accumulator turning irregular frame callbacks into logical ticks
// ============================================================================

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Highest supported rate: one tick per nanosecond
pub const MAX_TICK_RATE_HZ: u32 = 1_000_000_000;

/// Lifecycle and step notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Start,
    /// `index` counts ticks since the source was created, starting at 1
    Tick { index: u64 },
    Stop,
}

/// Receiver of tick events
pub trait TickListener {
    fn on_tick_event(&mut self, event: TickEvent);
}

impl<F: FnMut(TickEvent)> TickListener for F {
    fn on_tick_event(&mut self, event: TickEvent) {
        self(event)
    }
}

/// Fixed-frequency tick generator driven by the caller's frame loop.
///
/// The caller reports wall-clock instants through [`pump`](Self::pump). Elapsed
/// nanoseconds are accumulated multiplied by the tick rate, so one `Tick` is
/// due per full second of accumulator and the step never rounds. A stall of
/// `k` steps therefore produces exactly `k` ticks on the next pump, and jitter
/// never drops or duplicates a tick.
///
/// ```
/// use idle_economy::tick::{TickEvent, TickSource};
/// use std::num::NonZeroU32;
/// use std::time::{Duration, Instant};
///
/// let mut source = TickSource::new(NonZeroU32::new(10).unwrap());
/// let mut ticks = 0;
/// let mut count = |e: TickEvent| if let TickEvent::Tick { .. } = e { ticks += 1 };
///
/// let t0 = Instant::now();
/// source.start(t0, &mut count);
/// source.pump(t0 + Duration::from_millis(350), &mut count);
/// assert_eq!(ticks, 3);
/// ```
#[derive(Debug)]
pub struct TickSource {
    tick_rate_hz: NonZeroU32,
    /// Elapsed nanoseconds times the tick rate, minus ticks already emitted
    accumulated: u128,
    last_pump: Option<Instant>,
    running: bool,
    current_tick: u64,
}

impl TickSource {
    pub fn new(tick_rate_hz: NonZeroU32) -> Self {
        debug_assert!(
            tick_rate_hz.get() <= MAX_TICK_RATE_HZ,
            "tick rate above {} Hz",
            MAX_TICK_RATE_HZ
        );
        Self {
            tick_rate_hz,
            accumulated: 0,
            last_pump: None,
            running: false,
            current_tick: 0,
        }
    }

    pub fn tick_rate_hz(&self) -> NonZeroU32 {
        self.tick_rate_hz
    }

    /// Length of one logical step, rounded down to whole nanoseconds
    pub fn step(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.get()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks emitted since creation
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Begin ticking from `now`. Returns false if already running.
    pub fn start(&mut self, now: Instant, listener: &mut dyn TickListener) -> bool {
        if self.running {
            return false;
        }

        self.running = true;
        self.accumulated = 0;
        self.last_pump = Some(now);
        tracing::debug!("Tick source started at {} Hz", self.tick_rate_hz);
        listener.on_tick_event(TickEvent::Start);
        true
    }

    /// Stop ticking. Once this returns, `pump` emits nothing until the next
    /// `start`. Returns false if already stopped.
    pub fn stop(&mut self, listener: &mut dyn TickListener) -> bool {
        if !self.running {
            return false;
        }

        self.running = false;
        self.last_pump = None;
        tracing::debug!("Tick source stopped after {} ticks", self.current_tick);
        listener.on_tick_event(TickEvent::Stop);
        true
    }

    /// Account for time elapsed up to `now` and emit every tick now due.
    ///
    /// Returns the number of ticks emitted. Instants earlier than the previous
    /// pump count as zero elapsed time.
    pub fn pump(&mut self, now: Instant, listener: &mut dyn TickListener) -> u64 {
        if !self.running {
            return 0;
        }

        let previous = self.last_pump.unwrap_or(now);
        if now > previous {
            let elapsed = (now - previous).as_nanos();
            self.accumulated = self
                .accumulated
                .saturating_add(elapsed.saturating_mul(u128::from(self.tick_rate_hz.get())));
            self.last_pump = Some(now);
        }

        let mut emitted = 0;
        while self.accumulated >= NANOS_PER_SECOND {
            self.accumulated -= NANOS_PER_SECOND;
            self.current_tick += 1;
            emitted += 1;
            listener.on_tick_event(TickEvent::Tick {
                index: self.current_tick,
            });
        }

        if emitted > 1 {
            tracing::trace!("Caught up {} ticks in one pump", emitted);
        }

        emitted
    }
}
