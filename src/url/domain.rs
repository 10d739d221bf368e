/// Normalizes a domain name for lookups
///
/// Trims surrounding whitespace, drops a single trailing dot (fully qualified
/// form), and lowercases the result.
///
/// # Examples
///
/// ```
/// use ct_sweep::url::normalize_domain;
///
/// assert_eq!(normalize_domain("Example.COM."), "example.com");
/// assert_eq!(normalize_domain("  www.example.com "), "www.example.com");
/// ```
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    trimmed
        .strip_suffix('.')
        .unwrap_or(trimmed)
        .to_lowercase()
}
