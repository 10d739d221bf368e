use crate::config::types::{Config, DomainEntry, SourceConfig, UserAgentConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_domains(&config.domains)?;
    Ok(())
}

/// Validates the certificate search source settings
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use an http or https scheme",
            config.base_url
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must not carry a query string",
            config.base_url
        )));
    }

    if config.referer.trim().is_empty() {
        return Err(ConfigError::Validation(
            "referer cannot be empty".to_string(),
        ));
    }

    if let Err(e) = HeaderValue::from_str(&config.referer) {
        return Err(ConfigError::Validation(format!(
            "referer {:?} is not a valid header value: {}",
            config.referer, e
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client-name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates the configured domains and their custom patterns
fn validate_domains(domains: &[DomainEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in domains {
        validate_domain_string(&entry.name)?;

        if !seen.insert(entry.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "Domain '{}' is configured more than once",
                entry.name
            )));
        }

        if let Some(pattern) = &entry.pattern {
            regex::Regex::new(pattern).map_err(|e| {
                ConfigError::InvalidPattern(format!(
                    "Pattern for '{}' does not compile: {}",
                    entry.name, e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validates a domain name
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, pattern: Option<&str>) -> DomainEntry {
        DomainEntry {
            name: name.to_string(),
            pattern: pattern.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_domain_string() {
        assert!(validate_domain_string("example.com").is_ok());
        assert!(validate_domain_string("sub.example.co.uk").is_ok());

        assert!(validate_domain_string("").is_err());
        assert!(validate_domain_string("*.example.com").is_err());
        assert!(validate_domain_string("example").is_err());
        assert!(validate_domain_string(".example.com").is_err());
        assert!(validate_domain_string("example.com.").is_err());
        assert!(validate_domain_string("exa..mple.com").is_err());
    }

    #[test]
    fn test_duplicate_domains_rejected() {
        let domains = vec![entry("example.com", None), entry("Example.com", None)];
        assert!(matches!(
            validate_domains(&domains),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_custom_pattern_rejected() {
        let domains = vec![entry("example.com", Some("([a-z]+"))];
        assert!(matches!(
            validate_domains(&domains),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_source_scheme_checked() {
        let mut source = SourceConfig::default();
        assert!(validate_source_config(&source).is_ok());

        source.base_url = "ftp://ct.example.net/search".to_string();
        assert!(matches!(
            validate_source_config(&source),
            Err(ConfigError::InvalidUrl(_))
        ));

        source.base_url = "https://ct.example.net/search?x=1".to_string();
        assert!(validate_source_config(&source).is_err());
    }

    #[test]
    fn test_empty_referer_rejected() {
        let source = SourceConfig {
            referer: "  ".to_string(),
            ..SourceConfig::default()
        };
        assert!(matches!(
            validate_source_config(&source),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_referer_must_be_header_value() {
        let source = SourceConfig {
            referer: "https://transparencyreport.google.com/\r\nX-Injected: 1".to_string(),
            ..SourceConfig::default()
        };
        assert!(matches!(
            validate_source_config(&source),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_client_name_characters() {
        let mut ua = UserAgentConfig {
            client_name: "ct-sweep".to_string(),
            client_version: "0.1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
        };
        assert!(validate_user_agent_config(&ua).is_ok());

        ua.client_name = "ct sweep".to_string();
        assert!(validate_user_agent_config(&ua).is_err());
    }
}
