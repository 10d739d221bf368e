use chrono::{DateTime, Utc};
use std::fmt;

/// How a discovery request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepOutcome {
    /// No continuation token left; every page was read
    Exhausted,

    /// A page fetch failed; results up to that page were published
    TransportFailed,

    /// Cancelled while waiting for a slot or a page
    Cancelled,

    /// No pattern configured for the domain; nothing was fetched
    OutOfScope,
}

impl SweepOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::TransportFailed => "transport_failed",
            Self::Cancelled => "cancelled",
            Self::OutOfScope => "out_of_scope",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 4] {
        [
            Self::Exhausted,
            Self::TransportFailed,
            Self::Cancelled,
            Self::OutOfScope,
        ]
    }
}

impl fmt::Display for SweepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report of one discovery request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    pub domain: String,
    pub pages_fetched: u32,
    pub names_found: u64,
    pub outcome: SweepOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepSummary {
    /// Starts a summary for `domain`; the outcome is provisional until [`finish`](Self::finish)
    pub fn begin(domain: &str) -> Self {
        let now = Utc::now();
        Self {
            domain: domain.to_string(),
            pages_fetched: 0,
            names_found: 0,
            outcome: SweepOutcome::Exhausted,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn finish(mut self, outcome: SweepOutcome) -> Self {
        self.outcome = outcome;
        self.finished_at = Utc::now();
        self
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
