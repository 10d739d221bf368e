use std::time::Duration;
use tokio::time::Instant;

/// Tracks the spacing between granted fetch slots
///
/// Owned by a single rate limiter; nothing else reads or mutates it.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    /// Minimum time between two granted slots
    pub min_interval: Duration,

    /// When the last slot was granted
    pub last_granted: Option<Instant>,

    /// Number of slots granted so far
    pub grant_count: u64,
}

impl RateLimitState {
    /// Creates a new state with no slot granted yet
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_granted: None,
            grant_count: 0,
        }
    }

    /// Calculates the time until the next slot can be granted
    ///
    /// Returns None if a slot can be granted now, or the duration to wait otherwise.
    pub fn time_until_next_slot(&self, now: Instant) -> Option<Duration> {
        let last = self.last_granted?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// Records that a slot was granted at `now`
    pub fn record_grant(&mut self, now: Instant) {
        self.grant_count += 1;
        self.last_granted = Some(now);
    }
}
