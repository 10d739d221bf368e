use crate::config::types::Config;
use crate::url::{is_within_domain, normalize_domain, subdomain_regex};
use crate::ConfigError;
use regex::Regex;
use std::sync::Arc;

/// Resolves the hostname pattern for a requested domain
///
/// Returning `None` means the domain is not covered by configuration and the
/// request should be dropped.
pub trait PatternLookup: Send + Sync {
    fn domain_pattern(&self, domain: &str) -> Option<Arc<Regex>>;
}

/// Compiled hostname patterns for every configured domain
#[derive(Debug, Clone, Default)]
pub struct DomainScope {
    entries: Vec<(String, Arc<Regex>)>,
}

impl DomainScope {
    /// Creates an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles one pattern per configured domain
    ///
    /// Domains without a custom pattern get the default subdomain expression.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut scope = Self::new();
        for entry in &config.domains {
            let pattern = match &entry.pattern {
                Some(custom) => Regex::new(custom),
                None => subdomain_regex(&normalize_domain(&entry.name)),
            }
            .map_err(|e| {
                ConfigError::InvalidPattern(format!("Pattern for '{}': {}", entry.name, e))
            })?;
            scope.insert(&entry.name, pattern);
        }
        Ok(scope)
    }

    /// Adds or replaces the pattern for a root domain
    pub fn insert(&mut self, domain: &str, pattern: Regex) {
        let domain = normalize_domain(domain);
        let pattern = Arc::new(pattern);
        match self.entries.iter_mut().find(|(root, _)| *root == domain) {
            Some(existing) => existing.1 = pattern,
            None => self.entries.push((domain, pattern)),
        }
    }

    /// Configured root domains, in configuration order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(root, _)| root.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PatternLookup for DomainScope {
    /// Returns the pattern of the most specific configured root the domain falls under
    fn domain_pattern(&self, domain: &str) -> Option<Arc<Regex>> {
        let domain = normalize_domain(domain);
        self.entries
            .iter()
            .filter(|(root, _)| is_within_domain(root, &domain))
            .max_by_key(|(root, _)| root.len())
            .map(|(_, pattern)| Arc::clone(pattern))
    }
}
