use regex::Regex;

/// One or more DNS labels, each followed by a dot
///
/// Labels may carry underscores (service records and the like show up in
/// certificate SANs). Appended in front of an escaped root domain it matches
/// any subdomain of that root, but never the bare root itself.
pub const SUBDOMAIN_PREFIX: &str =
    r"(([a-zA-Z0-9]{1}|[_a-zA-Z0-9]{1}[_a-zA-Z0-9-]{0,61}[a-zA-Z0-9]{1})[.]{1})+";

/// Checks if a domain is the root domain or one of its subdomains
///
/// Both arguments are compared as given; callers normalize them first.
///
/// # Examples
///
/// ```
/// use ct_sweep::url::is_within_domain;
///
/// assert!(is_within_domain("example.com", "example.com"));
/// assert!(is_within_domain("example.com", "api.v2.example.com"));
/// assert!(!is_within_domain("example.com", "myexample.com"));
/// assert!(!is_within_domain("example.com", "example.org"));
/// ```
pub fn is_within_domain(root: &str, candidate: &str) -> bool {
    if root.is_empty() {
        return false;
    }
    candidate == root
        || candidate
            .strip_suffix(root)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Compiles the hostname pattern for a root domain
///
/// # Examples
///
/// ```
/// use ct_sweep::url::subdomain_regex;
///
/// let re = subdomain_regex("example.com").unwrap();
/// let found: Vec<&str> = re
///     .find_iter(r#"["www.example.com","example.com","mail.example.com"]"#)
///     .map(|m| m.as_str())
///     .collect();
/// assert_eq!(found, vec!["www.example.com", "mail.example.com"]);
/// ```
pub fn subdomain_regex(domain: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("{}{}", SUBDOMAIN_PREFIX, regex::escape(domain)))
}
