//! Control-loop state definitions for a single discovery request

use std::fmt;

/// Represents where a discovery request is in its pagination loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepState {
    /// Request received, nothing fetched yet
    Idle,

    /// Waiting for a rate-limit slot or for the transport to return a page
    FetchingPage,

    /// Scanning a fetched page for names and a continuation token
    Extracting,

    /// Pagination finished (exhausted, failed, cancelled, or out of scope)
    Done,
}

impl SweepState {
    /// Checks whether moving from this state to `next` is allowed
    ///
    /// | From | To |
    /// |------|----|
    /// | Idle | FetchingPage, Done |
    /// | FetchingPage | Extracting, Done |
    /// | Extracting | FetchingPage, Done |
    /// | Done | (none) |
    pub fn can_transition_to(&self, next: SweepState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::FetchingPage)
                | (Self::Idle, Self::Done)
                | (Self::FetchingPage, Self::Extracting)
                | (Self::FetchingPage, Self::Done)
                | (Self::Extracting, Self::FetchingPage)
                | (Self::Extracting, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingPage => "fetching_page",
            Self::Extracting => "extracting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SweepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
