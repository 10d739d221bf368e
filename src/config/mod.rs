//! Configuration module for ct-sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and compiles the per-domain hostname patterns used during discovery.
//!
//! # Example
//!
//! ```no_run
//! use ct_sweep::config::{load_config, DomainScope, PatternLookup};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! let scope = DomainScope::from_config(&config).unwrap();
//! assert!(scope.domain_pattern("example.com").is_some());
//! ```

mod parser;
mod scope;
mod types;
mod validation;

// Re-export types
pub use scope::{DomainScope, PatternLookup};
pub use types::{
    Config, DomainEntry, SourceConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_REFERER,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
