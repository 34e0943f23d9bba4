// ============================================================================
// Event Handler Interface
// Defines the contract for observing economy events
// ============================================================================

use crate::numeric::Currency;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Events emitted by the economy.
///
/// Per-tick accrual is deliberately silent; everything else that changes state
/// is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EconomyEvent {
    /// Tick source started delivering ticks
    Started { timestamp: DateTime<Utc> },

    /// Tick source stopped
    Stopped { timestamp: DateTime<Utc> },

    /// Units bought and paid for
    Purchased {
        item: String,
        quantity: u64,
        cost: Currency,
        timestamp: DateTime<Utc>,
    },

    /// Purchase refused, nothing changed
    PurchaseRejected {
        item: String,
        quantity: u64,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Manual click credited
    ManualAccrual {
        amount: Currency,
        timestamp: DateTime<Utc>,
    },

    /// Production credited for time spent offline
    OfflineAccrual {
        elapsed_ms: u64,
        amount: Currency,
        timestamp: DateTime<Utc>,
    },

    /// State handed to the persistence collaborator
    Saved { timestamp: DateTime<Utc> },
}

/// Event handler trait for processing economy events
/// Implementations can handle logging, UI notifications, analytics, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an economy event
    fn on_event(&self, event: EconomyEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<EconomyEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: EconomyEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: EconomyEvent) {
        tracing::debug!("Economy event: {:?}", event);
    }
}

/// Keeps every event in memory, in arrival order
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<EconomyEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<EconomyEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<EconomyEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: EconomyEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(EconomyEvent::Saved {
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingEventHandler::new();
        let now = Utc::now();
        handler.on_events(vec![
            EconomyEvent::Started { timestamp: now },
            EconomyEvent::Stopped { timestamp: now },
        ]);

        assert_eq!(handler.events().len(), 2);
        assert_eq!(handler.take()[0], EconomyEvent::Started { timestamp: now });
        assert!(handler.events().is_empty());
    }

    #[test]
    fn test_event_serializes_amounts_as_strings() {
        let event = EconomyEvent::ManualAccrual {
            amount: Currency::one(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"amount\":\"1.0000000000000000\""));
    }
}
