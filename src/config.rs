//! Client configuration.

use std::time::Duration;

/// Default base URL for the Danella API.
pub const DEFAULT_BASE_URL: &str = "https://danella-x.com";

/// Fixed endpoint of the external auth proxy that issues tokens.
pub const AUTH_ENDPOINT: &str = "https://outerapi.onrender.com/auth/token";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`DanellaClient`](crate::DanellaClient).
#[derive(Debug, Clone)]
pub struct DanellaConfig {
    /// Workflow API key used to obtain tokens.
    pub api_key: String,
    /// User ID sent with the token request.
    pub user_id: i64,
    /// Employee ID sent with the token request.
    pub employee_id: i64,
    /// Display name sent with the token request.
    pub name: String,
    /// Base URL of the Danella API.
    pub base_url: String,
    /// URL of the token-issuing auth endpoint.
    pub auth_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether 401 responses trigger an automatic token refresh.
    pub auto_refresh: bool,
}

impl DanellaConfig {
    /// Create a config with the given credentials and default endpoints.
    pub fn new(
        api_key: impl Into<String>,
        user_id: i64,
        employee_id: i64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            user_id,
            employee_id,
            name: name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_url: AUTH_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auto_refresh: true,
        }
    }

    /// Set a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom auth endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set a custom request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable automatic token refresh on 401.
    #[must_use]
    pub fn without_auto_refresh(mut self) -> Self {
        self.auto_refresh = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DanellaConfig::new("key", 1, 2, "tester");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.auth_url, AUTH_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.auto_refresh);
    }

    #[test]
    fn test_builder() {
        let config = DanellaConfig::new("key", 1, 2, "tester")
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5))
            .without_auto_refresh();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.auto_refresh);
    }
}
