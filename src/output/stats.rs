//! Statistics over finished discovery requests

use crate::discovery::{SweepOutcome, SweepSummary};
use std::collections::HashMap;

/// Aggregate over a set of request summaries
#[derive(Debug, Clone, Default)]
pub struct SweepStatistics {
    /// Number of requests
    pub total_requests: usize,

    /// Pages fetched across all requests
    pub total_pages: u64,

    /// Names published across all requests (duplicates included)
    pub total_names: u64,

    /// Count of requests by outcome
    pub requests_by_outcome: HashMap<SweepOutcome, usize>,

    /// Per-domain breakdown, in input order
    pub per_domain: Vec<DomainStatistics>,

    /// Longest single request
    pub slowest: Option<chrono::Duration>,
}

/// One line of the per-domain breakdown
#[derive(Debug, Clone)]
pub struct DomainStatistics {
    pub domain: String,
    pub pages: u32,
    pub names: u64,
    pub outcome: SweepOutcome,
    pub elapsed: chrono::Duration,
}

impl SweepStatistics {
    pub fn from_summaries(summaries: &[SweepSummary]) -> Self {
        let mut stats = Self {
            total_requests: summaries.len(),
            ..Self::default()
        };

        for summary in summaries {
            stats.total_pages += u64::from(summary.pages_fetched);
            stats.total_names += summary.names_found;
            *stats
                .requests_by_outcome
                .entry(summary.outcome)
                .or_insert(0) += 1;
            let elapsed = summary.elapsed();
            stats.slowest = Some(stats.slowest.map_or(elapsed, |s| s.max(elapsed)));
            stats.per_domain.push(DomainStatistics {
                domain: summary.domain.clone(),
                pages: summary.pages_fetched,
                names: summary.names_found,
                outcome: summary.outcome,
                elapsed,
            });
        }

        stats
    }

    pub fn count(&self, outcome: SweepOutcome) -> usize {
        self.requests_by_outcome.get(&outcome).copied().unwrap_or(0)
    }
}

/// Prints statistics to stderr so stdout stays a clean name list
pub fn print_statistics(stats: &SweepStatistics) {
    eprintln!("=== Sweep Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Requests: {}", stats.total_requests);
    eprintln!("  Pages fetched: {}", stats.total_pages);
    eprintln!("  Names found: {}", stats.total_names);
    if let Some(slowest) = stats.slowest {
        eprintln!("  Slowest request: {}ms", slowest.num_milliseconds());
    }
    eprintln!();

    eprintln!("Requests by Outcome:");
    for outcome in SweepOutcome::all() {
        let count = stats.count(outcome);
        if count > 0 {
            eprintln!("  {}: {}", outcome, count);
        }
    }
    eprintln!();

    if !stats.per_domain.is_empty() {
        eprintln!("Domains:");
        for line in &stats.per_domain {
            eprintln!(
                "  - {}: {} names over {} pages in {}ms ({})",
                line.domain,
                line.names,
                line.pages,
                line.elapsed.num_milliseconds(),
                line.outcome
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(domain: &str, pages: u32, names: u64, outcome: SweepOutcome) -> SweepSummary {
        let mut summary = SweepSummary::begin(domain);
        summary.pages_fetched = pages;
        summary.names_found = names;
        summary.finish(outcome)
    }

    #[test]
    fn test_from_summaries() {
        let stats = SweepStatistics::from_summaries(&[
            summary("example.com", 3, 40, SweepOutcome::Exhausted),
            summary("example.org", 1, 5, SweepOutcome::TransportFailed),
            summary("example.net", 0, 0, SweepOutcome::OutOfScope),
            summary("example.io", 2, 7, SweepOutcome::Exhausted),
        ]);

        assert_eq!(stats.total_requests, 4);
        assert_eq!(stats.total_pages, 6);
        assert_eq!(stats.total_names, 52);
        assert_eq!(stats.count(SweepOutcome::Exhausted), 2);
        assert_eq!(stats.count(SweepOutcome::TransportFailed), 1);
        assert_eq!(stats.count(SweepOutcome::Cancelled), 0);
        assert_eq!(stats.per_domain[1].domain, "example.org");
        assert_eq!(stats.per_domain[1].outcome, SweepOutcome::TransportFailed);
    }

    #[test]
    fn test_slowest_request() {
        let mut quick = summary("example.com", 1, 1, SweepOutcome::Exhausted);
        quick.finished_at = quick.started_at + chrono::Duration::milliseconds(40);
        let mut slow = summary("example.org", 4, 9, SweepOutcome::Exhausted);
        slow.finished_at = slow.started_at + chrono::Duration::milliseconds(2500);

        let stats = SweepStatistics::from_summaries(&[quick, slow]);

        assert_eq!(stats.slowest, Some(chrono::Duration::milliseconds(2500)));
        assert_eq!(
            stats.per_domain[0].elapsed,
            chrono::Duration::milliseconds(40)
        );
    }

    #[test]
    fn test_empty() {
        let stats = SweepStatistics::from_summaries(&[]);
        assert_eq!(stats.total_requests, 0);
        assert!(stats.per_domain.is_empty());
        assert!(stats.slowest.is_none());
        print_statistics(&stats);
    }
}
