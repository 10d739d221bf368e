//! Discovery unit interface and request types

use crate::discovery::summary::SweepSummary;
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Kind of data a discovery unit draws on, used as the tag on its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Api,
    Archive,
    Cert,
    Dns,
    Scrape,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Archive => "archive",
            Self::Cert => "cert",
            Self::Dns => "dns",
            Self::Scrape => "scrape",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to discover hostnames under one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// The domain to search for
    pub domain: String,

    /// Provenance tag supplied by the caller
    pub tag: String,

    /// Provenance source label supplied by the caller
    pub source: String,
}

impl DiscoveryRequest {
    pub fn new(
        domain: impl Into<String>,
        tag: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            tag: tag.into(),
            source: source.into(),
        }
    }
}

/// A unit that turns a domain into a stream of discovered hostnames
///
/// Implementations publish their results as events and never fail the
/// caller: every request ends in a [`SweepSummary`].
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Label identifying the unit (used as the `source` on its results)
    fn name(&self) -> &str;

    fn source_type(&self) -> SourceType;

    async fn on_request(
        &self,
        request: &DiscoveryRequest,
        cancel: &CancellationToken,
    ) -> SweepSummary;
}
