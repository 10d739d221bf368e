//! Page transport
//!
//! This module handles the HTTP side of discovery:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - The fixed request headers sent with every page fetch
//! - Fetching a single page body, treating non-2xx statuses as failures

use crate::config::{SourceConfig, UserAgentConfig};
use crate::TransportError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, CONNECTION, REFERER};
use reqwest::Client;
use std::time::Duration;

/// Retrieves one page body
///
/// Implementations make a single attempt; retry policy is not the caller's
/// concern and must not be hidden in here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, TransportError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `source` - Source settings supplying the request timeout
///
/// # Example
///
/// ```no_run
/// use ct_sweep::config::{SourceConfig, UserAgentConfig};
/// use ct_sweep::discovery::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     client_name: "ct-sweep".to_string(),
///     client_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    source: &SourceConfig,
) -> Result<Client, reqwest::Error> {
    // Format: ClientName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.client_name, user_agent.client_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(source.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the headers sent with every page request
///
/// Fails if `referer` is not a valid header value.
pub fn page_headers(referer: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(REFERER, HeaderValue::from_str(referer)?);
    Ok(headers)
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration and wraps it
    pub fn from_config(
        user_agent: &UserAgentConfig,
        source: &SourceConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, source)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
