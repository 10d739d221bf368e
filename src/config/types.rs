use serde::Deserialize;

/// Default certificate search endpoint
pub const DEFAULT_BASE_URL: &str =
    "https://www.google.com/transparencyreport/api/v3/httpsreport/ct/certsearch";

/// Referer sent with every page request
pub const DEFAULT_REFERER: &str = "https://transparencyreport.google.com/https/certificates";

/// Main configuration structure for ct-sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default, rename = "domain")]
    pub domains: Vec<DomainEntry>,
}

/// Certificate search source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// First-page endpoint; continuation pages live under `<base-url>/page`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Value of the Referer header sent with every request
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Minimum time between two page fetches (milliseconds)
    #[serde(rename = "rate-limit-ms", default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Transport timeout for a single page fetch (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            referer: default_referer(),
            rate_limit_ms: default_rate_limit_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_rate_limit_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// A domain in scope for discovery
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    /// Root domain (e.g., "example.com")
    pub name: String,

    /// Custom hostname pattern replacing the default subdomain expression
    #[serde(default)]
    pub pattern: Option<String>,
}
