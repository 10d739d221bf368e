//! ct-sweep: certificate transparency subdomain discovery
//!
//! This crate implements a discovery unit that pages through the Google
//! Transparency Report certificate search for a domain, extracts hostnames
//! that belong to it, and publishes each one as an event.

pub mod config;
pub mod discovery;
pub mod events;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for ct-sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised by the page transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
}

// Re-export commonly used types
pub use config::{Config, DomainScope, PatternLookup};
pub use discovery::{DataSource, DiscoveryRequest, GoogleCt, SweepOutcome, SweepSummary};
pub use events::{DiscoveredName, EventBus, EventSink, Priority, SweepEvent};
pub use state::{RateLimitState, SweepState};
pub use crate::url::build_page_url;
