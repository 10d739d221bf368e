//! Event publication for discovery units
//!
//! Units publish three kinds of events: discovered hostnames, operational
//! log messages, and liveness heartbeats. Each carries a [`Priority`].

mod bus;
mod types;

pub use bus::{EventBus, EventSink};
pub use types::{DiscoveredName, Envelope, Priority, SweepEvent};
