//! Event payloads published by discovery units

use std::fmt;

/// Delivery priority attached to every published event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A hostname found by a discovery unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredName {
    /// The hostname as it appeared in the source data
    pub name: String,

    /// The domain the request was made for
    pub domain: String,

    /// Source type tag (e.g. "cert")
    pub tag: String,

    /// Label of the unit that found it (e.g. "GoogleCT")
    pub source: String,
}

/// Everything a discovery unit publishes on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    /// A discovered hostname
    NewName(DiscoveredName),

    /// Human-readable operational message
    Log { message: String },

    /// Liveness signal: the named unit is about to do work
    SetActive { source: String },
}

impl SweepEvent {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    pub fn set_active(source: impl Into<String>) -> Self {
        Self::SetActive {
            source: source.into(),
        }
    }

    /// Returns the discovered name if this is a name event
    pub fn as_name(&self) -> Option<&DiscoveredName> {
        match self {
            Self::NewName(name) => Some(name),
            _ => None,
        }
    }
}

/// An event together with its delivery priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub priority: Priority,
    pub event: SweepEvent,
}
