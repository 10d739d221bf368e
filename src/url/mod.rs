//! URL handling module for ct-sweep
//!
//! This module builds certificate search request URLs and provides the
//! domain helpers used to resolve per-domain hostname patterns.

mod domain;
mod matcher;

use url::Url;

// Re-export main functions
pub use domain::normalize_domain;
pub use matcher::{is_within_domain, subdomain_regex, SUBDOMAIN_PREFIX};

/// Builds the request URL for one certificate search page
///
/// Without a token (or with an empty one) this is the first-page endpoint.
/// With a token the request goes to `<base>/page` and carries `p=<token>`.
/// The domain is form-encoded but otherwise passed through unchanged.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ct_sweep::url::build_page_url;
///
/// let base = Url::parse("https://ct.example.net/certsearch").unwrap();
///
/// let first = build_page_url(&base, "example.com", None);
/// assert_eq!(
///     first.as_str(),
///     concat!(
///         "https://ct.example.net/certsearch",
///         "?domain=example.com&include_expired=true&include_subdomains=true"
///     )
/// );
///
/// let next = build_page_url(&base, "example.com", Some("abc123"));
/// assert_eq!(next.path(), "/certsearch/page");
/// assert!(next.as_str().ends_with("&p=abc123"));
/// ```
pub fn build_page_url(base: &Url, domain: &str, token: Option<&str>) -> Url {
    let token = token.filter(|t| !t.is_empty());
    let mut url = base.clone();

    if token.is_some() {
        let path = format!("{}/page", base.path().trim_end_matches('/'));
        url.set_path(&path);
    }

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query
            .append_pair("domain", domain)
            .append_pair("include_expired", "true")
            .append_pair("include_subdomains", "true");
        if let Some(token) = token {
            query.append_pair("p", token);
        }
    }

    url
}
