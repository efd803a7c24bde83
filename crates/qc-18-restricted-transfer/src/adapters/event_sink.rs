//! Event Sink Adapters
//!
//! `InMemoryEventSink` collects events for inspection. `TracingEventSink`
//! forwards them to the structured log stream.

use crate::events::TransferEvent;
use crate::ports::EventSink;
use parking_lot::RwLock;
use tracing::info;

/// Collects emitted events in order.
#[derive(Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<TransferEvent>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far.
    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Drain collected events.
    pub fn take(&self) -> Vec<TransferEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

impl EventSink for InMemoryEventSink {
    fn emit(&self, event: TransferEvent) {
        self.events.write().push(event);
    }
}

/// Logs each event with its flattened attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: TransferEvent) {
        let attributes = event
            .attributes()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(
            event_type = event.event_type(),
            "[qc-18] event {}",
            attributes
        );
    }
}
