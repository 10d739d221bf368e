//! Google Transparency Report certificate search unit
//!
//! For each request this unit pages through the certificate search strictly
//! in order: wait for a rate-limit slot, announce itself as active, fetch the
//! page, publish every hostname in it, then follow the continuation token
//! until there is none.

use crate::config::{PatternLookup, SourceConfig};
use crate::discovery::extractor::{Extractor, TokenPatternExtractor};
use crate::discovery::fetcher::{page_headers, Transport};
use crate::discovery::limiter::RateLimiter;
use crate::discovery::summary::{SweepOutcome, SweepSummary};
use crate::discovery::traits::{DataSource, DiscoveryRequest, SourceType};
use crate::events::{DiscoveredName, EventSink, Priority, SweepEvent};
use crate::state::SweepState;
use crate::url::build_page_url;
use crate::SweepError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Label this unit publishes under
pub const GOOGLE_CT_NAME: &str = "GoogleCT";

/// Certificate transparency discovery unit
pub struct GoogleCt {
    base_url: Url,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    extractor: Arc<dyn Extractor>,
    limiter: Arc<RateLimiter>,
    patterns: Arc<dyn PatternLookup>,
    sink: Arc<dyn EventSink>,
}

impl GoogleCt {
    /// Creates a unit with its own rate limiter and the default extractor
    ///
    /// # Arguments
    ///
    /// * `source` - Endpoint, referer and rate limit settings
    /// * `transport` - Fetches page bodies
    /// * `patterns` - Resolves the hostname pattern for a requested domain
    /// * `sink` - Receives names, log messages and heartbeats
    ///
    /// # Returns
    ///
    /// * `Ok(GoogleCt)` - Ready to serve requests
    /// * `Err(SweepError)` - The base URL does not parse or the referer is not a valid header
    pub fn new(
        source: &SourceConfig,
        transport: Arc<dyn Transport>,
        patterns: Arc<dyn PatternLookup>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, SweepError> {
        Ok(Self {
            base_url: Url::parse(&source.base_url)?,
            headers: page_headers(&source.referer)?,
            transport,
            extractor: Arc::new(TokenPatternExtractor),
            limiter: Arc::new(RateLimiter::new(Duration::from_millis(source.rate_limit_ms))),
            patterns,
            sink,
        })
    }

    /// Replaces the rate limiter, e.g. to share one across several units
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Replaces the page extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// The limiter consulted before every page fetch
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Runs the page loop for one request
    async fn sweep(
        &self,
        request: &DiscoveryRequest,
        pattern: &Regex,
        cancel: &CancellationToken,
        summary: &mut SweepSummary,
    ) -> SweepOutcome {
        let mut state = SweepState::Idle;
        let mut token: Option<String> = None;

        loop {
            advance(&mut state, SweepState::FetchingPage);
            let url = build_page_url(&self.base_url, &request.domain, token.as_deref());

            if self.limiter.wait_for_slot(cancel).await.is_err() {
                advance(&mut state, SweepState::Done);
                return SweepOutcome::Cancelled;
            }

            self.sink
                .publish(Priority::Critical, SweepEvent::set_active(self.name()));

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.transport.fetch(url.as_str(), &self.headers) => Some(result),
            };

            let body = match fetched {
                None => {
                    advance(&mut state, SweepState::Done);
                    return SweepOutcome::Cancelled;
                }
                Some(Err(e)) => {
                    tracing::warn!("{}: {}: {}", self.name(), url, e);
                    self.sink.publish(
                        Priority::High,
                        SweepEvent::log(format!("{}: {}: {}", self.name(), url, e)),
                    );
                    advance(&mut state, SweepState::Done);
                    return SweepOutcome::TransportFailed;
                }
                Some(Ok(body)) => body,
            };

            // A page that finished racing the cancel signal is dropped unpublished
            if cancel.is_cancelled() {
                advance(&mut state, SweepState::Done);
                return SweepOutcome::Cancelled;
            }

            advance(&mut state, SweepState::Extracting);
            summary.pages_fetched += 1;

            let extraction = self.extractor.extract(pattern, &body);
            tracing::debug!(
                "{}: page {} for {}: {} names, next token: {}",
                self.name(),
                summary.pages_fetched,
                request.domain,
                extraction.names.len(),
                extraction.next_token.is_some()
            );

            for name in extraction.names {
                self.sink.publish(
                    Priority::High,
                    SweepEvent::NewName(DiscoveredName {
                        name,
                        domain: request.domain.clone(),
                        tag: self.source_type().to_string(),
                        source: self.name().to_string(),
                    }),
                );
                summary.names_found += 1;
            }

            match extraction.next_token {
                Some(next) => token = Some(next),
                None => {
                    advance(&mut state, SweepState::Done);
                    return SweepOutcome::Exhausted;
                }
            }
        }
    }
}

/// Moves the loop to `next`
fn advance(state: &mut SweepState, next: SweepState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid sweep transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Sweep state {} -> {}", state, next);
    *state = next;
}

#[async_trait]
impl DataSource for GoogleCt {
    fn name(&self) -> &str {
        GOOGLE_CT_NAME
    }

    fn source_type(&self) -> SourceType {
        SourceType::Cert
    }

    async fn on_request(
        &self,
        request: &DiscoveryRequest,
        cancel: &CancellationToken,
    ) -> SweepSummary {
        let mut summary = SweepSummary::begin(&request.domain);

        if cancel.is_cancelled() {
            return summary.finish(SweepOutcome::Cancelled);
        }

        let Some(pattern) = self.patterns.domain_pattern(&request.domain) else {
            tracing::debug!(
                "{}: no pattern configured for {}, dropping request",
                self.name(),
                request.domain
            );
            return summary.finish(SweepOutcome::OutOfScope);
        };

        tracing::info!(
            "Querying {} for {} subdomains (requested by {}/{})",
            self.name(),
            request.domain,
            request.source,
            request.tag
        );
        self.sink.publish(
            Priority::High,
            SweepEvent::log(format!(
                "Querying {} for {} subdomains",
                self.name(),
                request.domain
            )),
        );

        let outcome = self.sweep(request, &pattern, cancel, &mut summary).await;
        let summary = summary.finish(outcome);

        tracing::info!(
            "{}: {} finished ({}): {} pages, {} names",
            self.name(),
            request.domain,
            summary.outcome,
            summary.pages_fetched,
            summary.names_found
        );

        summary
    }
}
