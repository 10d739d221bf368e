//! Discovery module for certificate transparency hostname sweeps
//!
//! This module contains the discovery unit and its collaborators:
//! - Page URL building (in `crate::url`) and HTTP fetching
//! - Rate limiting shared across requests
//! - Hostname and continuation token extraction
//! - The per-request pagination loop

mod extractor;
mod fetcher;
mod google_ct;
mod limiter;
mod summary;
mod traits;

pub use extractor::{
    find_names, parse_continuation, Continuation, Extractor, PageExtraction,
    TokenPatternExtractor, TOKEN_PATTERN,
};
pub use fetcher::{build_http_client, page_headers, HttpTransport, Transport};
pub use google_ct::{GoogleCt, GOOGLE_CT_NAME};
pub use limiter::RateLimiter;
pub use summary::{SweepOutcome, SweepSummary};
pub use traits::{DataSource, DiscoveryRequest, SourceType};

use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs one request per domain concurrently on a shared source
///
/// Pagination stays sequential within each domain; the source's rate limiter
/// spaces fetches across all of them. Summaries are returned in completion order.
pub async fn sweep_domains(
    source: Arc<dyn DataSource>,
    domains: Vec<String>,
    cancel: CancellationToken,
) -> Vec<SweepSummary> {
    let mut tasks = JoinSet::new();

    for domain in domains {
        let source = Arc::clone(&source);
        let cancel = cancel.clone();
        tasks.spawn(async move {
            let request =
                DiscoveryRequest::new(domain, source.source_type().as_str(), source.name());
            source.on_request(&request, &cancel).await
        });
    }

    let mut summaries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(summary) => summaries.push(summary),
            Err(e) => tracing::error!("Discovery task failed: {}", e),
        }
    }
    summaries
}
