//! Rate limiting for outbound page fetches
//!
//! One limiter is shared by every request a unit serves, so it puts a floor
//! on request cadence for the whole data source, not just for one domain.

use crate::state::RateLimitState;
use crate::SweepError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Enforces a minimum interval between granted fetch slots
///
/// Waiters are served one at a time: the state lock is held while a waiter
/// sleeps, so grants are spaced grant to grant even under contention.
#[derive(Debug)]
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(RateLimitState::new(min_interval)),
        }
    }

    /// Changes the enforced interval; applies to the next wait
    pub async fn configure(&self, min_interval: Duration) {
        self.state.lock().await.min_interval = min_interval;
    }

    /// Returns the currently enforced interval
    pub async fn min_interval(&self) -> Duration {
        self.state.lock().await.min_interval
    }

    /// Waits until a fetch slot is available and claims it
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A slot was granted and recorded
    /// * `Err(SweepError::Cancelled)` - `cancel` fired while waiting; no slot was recorded
    pub async fn wait_for_slot(&self, cancel: &CancellationToken) -> Result<(), SweepError> {
        let mut state = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SweepError::Cancelled),
            state = self.state.lock() => state,
        };

        if let Some(wait) = state.time_until_next_slot(Instant::now()) {
            tracing::trace!("Rate limited, waiting {:?}", wait);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SweepError::Cancelled),
                _ = tokio::time::sleep(wait) => {}
            }
        }

        if cancel.is_cancelled() {
            return Err(SweepError::Cancelled);
        }

        state.record_grant(Instant::now());
        Ok(())
    }

    /// Number of slots granted so far
    pub async fn grant_count(&self) -> u64 {
        self.state.lock().await.grant_count
    }
}
