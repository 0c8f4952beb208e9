//! Outbound identity and timeout settings for the REST gateway.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// HTTP user agent sent when the configuration does not set one.
pub const DEFAULT_USER_AGENT: &str = "aquavia-miniapp-client/0.1";

/// Settings for [`super::RestGateway`].
///
/// Deserialisable from any serde source; only `base_url` is required:
///
/// ```
/// use aquavia_client::outbound::http::RestGatewayConfig;
///
/// let config: RestGatewayConfig =
///     serde_json::from_str(r#"{"base_url": "https://water.example"}"#).expect("valid config");
/// assert_eq!(config.timeout_seconds, 30);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RestGatewayConfig {
    /// Backend origin; the adapter appends the `/api/v1` prefix itself and
    /// preserves any path on the configured URL, with or without a trailing
    /// slash.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Outbound user-agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl RestGatewayConfig {
    /// Configuration for `base_url` with the default timeout and identity.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// The configured timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}
