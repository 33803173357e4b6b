//! Event publisher adapters.

use crate::events::RouterEventEnvelope;
use crate::ports::outbound::RouterEventPublisher;
use parking_lot::Mutex;
use tracing::info;

/// Writes every event to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl RouterEventPublisher for TracingEventPublisher {
    fn publish(&self, envelope: RouterEventEnvelope) {
        info!(
            event_id = %envelope.event_id,
            timestamp = envelope.timestamp,
            "[router] {}: {:?}",
            envelope.event.name(),
            envelope.event
        );
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventPublisher;

impl RouterEventPublisher for NoopEventPublisher {
    fn publish(&self, _envelope: RouterEventEnvelope) {}
}

/// Keeps every event in memory, in publication order.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<RouterEventEnvelope>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far.
    pub fn events(&self) -> Vec<RouterEventEnvelope> {
        self.events.lock().clone()
    }

    /// Remove and return everything published so far.
    pub fn drain(&self) -> Vec<RouterEventEnvelope> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl RouterEventPublisher for RecordingEventPublisher {
    fn publish(&self, envelope: RouterEventEnvelope) {
        self.events.lock().push(envelope);
    }
}
