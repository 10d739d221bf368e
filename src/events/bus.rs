//! In-process event bus
//!
//! Delivery is at-most-once and in memory only: slow receivers may lag and
//! miss envelopes, and nothing is replayed to late subscribers.

use crate::events::types::{Envelope, Priority, SweepEvent};
use tokio::sync::broadcast;

/// Default channel capacity for the event bus
const DEFAULT_CAPACITY: usize = 10_000;

/// Publish capability handed to discovery units
pub trait EventSink: Send + Sync {
    fn publish(&self, priority: Priority, event: SweepEvent);
}

/// Broadcast-backed event bus
///
/// Cloning the bus yields another handle onto the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Envelope>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new event bus with the specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to envelopes published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for EventBus {
    fn publish(&self, priority: Priority, event: SweepEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(Envelope { priority, event });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
