use std::time::Duration;

/// Backend base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
/// TCP connect timeout when nothing is configured.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout when nothing is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Sent as `X-API-KEY` when set.
    pub api_key: Option<String>,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Default timeouts against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Same config with `api_key` (blank keys are dropped).
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Absolute URL of `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let config = ApiConfig::new("http://host/api/v1/");
        assert_eq!(config.url("/posts/3"), "http://host/api/v1/posts/3");
        assert_eq!(config.url("users"), "http://host/api/v1/users");
    }

    #[test]
    fn blank_api_key_is_dropped() {
        let config = ApiConfig::default().with_api_key(Some("  ".to_string()));
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    }
}
