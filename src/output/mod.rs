//! Output module for discovered names and sweep statistics
//!
//! This module handles:
//! - Consuming bus events and writing discovered names
//! - Forwarding operational log events to tracing
//! - Summarizing finished requests

pub mod stats;
mod writer;

pub use stats::{print_statistics, DomainStatistics, SweepStatistics};
pub use writer::NameWriter;

use crate::events::{Envelope, SweepEvent};
use tokio::sync::broadcast::{self, error::RecvError};

/// What a consumer saw on the bus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Names written out
    pub written: u64,

    /// Envelopes lost because the consumer fell behind
    pub dropped: u64,
}

impl DrainReport {
    /// True if the written name list may be missing entries
    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }
}

/// Consumes bus events until every sender is gone
///
/// Names go to `writer`, log messages to tracing, heartbeats are traced only.
/// A lagging receiver loses envelopes; the loss is counted in the report and
/// consumption goes on.
///
/// # Returns
///
/// * `Ok(DrainReport)` - Names written and envelopes lost
/// * `Err(io::Error)` - Writing or flushing failed
pub async fn drain_events(
    mut events: broadcast::Receiver<Envelope>,
    writer: &mut NameWriter,
) -> std::io::Result<DrainReport> {
    let before = writer.written();
    let mut dropped = 0;

    loop {
        match events.recv().await {
            Ok(envelope) => match envelope.event {
                SweepEvent::NewName(found) => {
                    tracing::trace!("{} found {} for {}", found.source, found.name, found.domain);
                    writer.write_name(&found.name)?;
                }
                SweepEvent::Log { message } => {
                    tracing::info!("[{}] {}", envelope.priority, message);
                }
                SweepEvent::SetActive { source } => {
                    tracing::trace!("{} is active", source);
                }
            },
            Err(RecvError::Lagged(missed)) => {
                tracing::error!("Event consumer lagged, {} events dropped", missed);
                dropped += missed;
            }
            Err(RecvError::Closed) => break,
        }
    }

    writer.flush()?;
    Ok(DrainReport {
        written: writer.written() - before,
        dropped,
    })
}
