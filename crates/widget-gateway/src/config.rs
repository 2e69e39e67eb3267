//! Configuration for the HTTP gateway.

use std::env;
use std::time::Duration;

use widget_core::WidgetError;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "https://api.npobots.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`crate::HttpGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,

    /// Per-request timeout. Applies to every call, including analytics.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `NPO_API_URL` - Backend base URL (default: https://api.npobots.com)
    /// - `NPO_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
    pub fn from_env() -> Result<Self, WidgetError> {
        let api_url = env::var("NPO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let request_timeout = env::var("NPO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }
}

/// Builder for [`GatewayConfig`].
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    /// Set the backend base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder() {
        let config = GatewayConfig::builder()
            .api_url("https://api.example.org/")
            .request_timeout(Duration::from_secs(3))
            .build();

        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vars() {
            std::env::remove_var("NPO_API_URL");
            std::env::remove_var("NPO_REQUEST_TIMEOUT_SECS");
        }

        // Scenario 1: nothing set, defaults used
        clear_vars();
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);

        // Scenario 2: both set
        std::env::set_var("NPO_API_URL", "https://staging.npobots.com/");
        std::env::set_var("NPO_REQUEST_TIMEOUT_SECS", "5");
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.api_url, "https://staging.npobots.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        // Scenario 3: unparseable timeout falls back to default
        std::env::set_var("NPO_REQUEST_TIMEOUT_SECS", "soon");
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);

        clear_vars();
    }
}
