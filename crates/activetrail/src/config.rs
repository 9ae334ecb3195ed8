//! Configuration for the ActiveTrail client

use crate::error::{Error, Result};
use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries for transport failures
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for the ActiveTrail client.
///
/// Immutable once a client is built from it; the client and its executor
/// share it read-only.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key, sent verbatim in the `Authorization` header
    pub api_key: Option<SecretString>,

    /// Base URL for the API. `None` means [`crate::DEFAULT_BASE_URL`].
    pub base_url: Option<String>,

    /// Hard deadline for each request attempt
    pub timeout: Duration,

    /// Immediate retries after a timeout or connection failure
    pub max_retries: u32,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// `User-Agent` override
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            default_headers: HeaderMap::new(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Start building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// This will look for:
    /// - `ACTIVETRAIL_API_KEY` for authentication
    /// - `ACTIVETRAIL_BASE_URL` for the API base URL
    /// - `ACTIVETRAIL_TIMEOUT` for request timeout (in seconds)
    /// - `ACTIVETRAIL_MAX_RETRIES` for maximum retry attempts
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a numeric variable does not parse.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("ACTIVETRAIL_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("ACTIVETRAIL_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("ACTIVETRAIL_TIMEOUT") {
            let timeout_secs = timeout_str.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("ACTIVETRAIL_TIMEOUT is not a number: {timeout_str}"))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(max_retries_str) = env::var("ACTIVETRAIL_MAX_RETRIES") {
            config.max_retries = max_retries_str.trim().parse::<u32>().map_err(|_| {
                Error::Config(format!(
                    "ACTIVETRAIL_MAX_RETRIES is not a number: {max_retries_str}"
                ))
            })?;
        }

        Ok(config)
    }

    /// The effective base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(crate::DEFAULT_BASE_URL)
    }

    /// The effective `User-Agent` header value.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("activetrail-rust/{}", crate::VERSION))
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::Config(format!("invalid header name: {key_str}")))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::Config(format!("invalid header value for {key}")))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url(), "https://webapi.mymarketing.co.il/api/");
    }

    #[test]
    fn test_config_with_api_key() {
        let config = ClientConfig::with_api_key("test-key");
        assert_eq!(config.api_key.unwrap().expose_secret(), "test-key");
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .api_key("test-key")
            .base_url("https://example.com/api/")
            .timeout(Duration::from_secs(5))
            .max_retries(0)
            .user_agent("my-app/1.0")
            .default_header("x-tenant", "42")
            .unwrap()
            .build();

        assert!(config.api_key.is_some());
        assert_eq!(config.base_url(), "https://example.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.user_agent(), "my-app/1.0");
        assert_eq!(config.default_headers["x-tenant"], "42");
    }

    #[test]
    fn test_default_user_agent_carries_version() {
        let config = ClientConfig::default();
        assert!(config.user_agent().ends_with(crate::VERSION));
    }

    #[test]
    fn test_invalid_default_header() {
        let result = ClientConfig::builder().default_header("bad header", "v");
        assert_matches!(result, Err(Error::Config(_)));

        let result = ClientConfig::builder().default_header("x-ok", "bad\nvalue");
        assert_matches!(result, Err(Error::Config(_)));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("ACTIVETRAIL_API_KEY", Some("env-key")),
                ("ACTIVETRAIL_BASE_URL", Some("http://localhost:8080/api/")),
                ("ACTIVETRAIL_TIMEOUT", Some("12")),
                ("ACTIVETRAIL_MAX_RETRIES", Some("4")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.api_key.unwrap().expose_secret(), "env-key");
                assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api/"));
                assert_eq!(config.timeout, Duration::from_secs(12));
                assert_eq!(config.max_retries, 4);
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_rejects_bad_numbers() {
        temp_env::with_vars(
            [
                ("ACTIVETRAIL_API_KEY", Some("env-key")),
                ("ACTIVETRAIL_TIMEOUT", Some("soon")),
            ],
            || {
                assert_matches!(ClientConfig::from_env(), Err(Error::Config(_)));
            },
        );
    }
}
