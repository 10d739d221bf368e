//! Page scanning for hostnames and the continuation token
//!
//! The certificate search response is not a documented format, so both scans
//! match a few fixed sub-structures with regular expressions rather than
//! parsing the body. Swapping the strategy means swapping the [`Extractor`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Continuation tuple: `[<null|"id">,"<token>",null,<shown>,<total>]`
pub const TOKEN_PATTERN: &str =
    r#"\[(null|"[a-zA-Z0-9]+"),"([a-zA-Z0-9]+)",null,([0-9]+),([0-9]+)\]"#;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("continuation pattern is valid"));

/// The continuation tuple found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub token: String,
    pub shown: u64,
    pub total: u64,
}

impl Continuation {
    /// Token to request the next page with, if there is one
    ///
    /// Equal counters mean the last page was reached. This is inferred from
    /// observed responses, the service documents no end-of-results signal.
    pub fn next_token(&self) -> Option<&str> {
        if self.token.is_empty() || self.shown == self.total {
            None
        } else {
            Some(&self.token)
        }
    }
}

/// Everything pulled out of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Hostname matches in match order, duplicates kept
    pub names: Vec<String>,

    /// Token for the next page; `None` stops pagination
    pub next_token: Option<String>,
}

/// Scans a page body for names and for the next-page token
pub trait Extractor: Send + Sync {
    fn extract(&self, pattern: &Regex, body: &str) -> PageExtraction;
}

/// Default extractor for the certificate search response format
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPatternExtractor;

impl Extractor for TokenPatternExtractor {
    fn extract(&self, pattern: &Regex, body: &str) -> PageExtraction {
        PageExtraction {
            names: find_names(pattern, body),
            next_token: parse_continuation(body)
                .as_ref()
                .and_then(Continuation::next_token)
                .map(str::to_string),
        }
    }
}

/// All non-overlapping matches of `pattern`, in order
pub fn find_names(pattern: &Regex, body: &str) -> Vec<String> {
    pattern
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Finds the first continuation tuple in a page body
///
/// Returns None when no tuple matches or a counter does not fit in a u64;
/// either way the caller stops paginating.
pub fn parse_continuation(body: &str) -> Option<Continuation> {
    let caps = TOKEN_RE.captures(body)?;
    let token = caps.get(2)?.as_str().to_string();
    let shown = caps.get(3)?.as_str().parse().ok()?;
    let total = caps.get(4)?.as_str().parse().ok()?;

    Some(Continuation {
        token,
        shown,
        total,
    })
}
