//! Configuration management for the identity client.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Upper bound for `REQUEST_TIMEOUT`, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 3_600;

/// Upper bound for `PROFILE_CACHE_TTL_SECONDS` (one week).
const MAX_PROFILE_CACHE_TTL_SECS: u64 = 7 * 24 * 3_600;

/// Configuration for the identity client.
#[derive(Clone)]
pub struct Config {
    /// Identity API base URL
    pub api_url: String,

    /// Bearer token sent with every request
    pub api_token: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Profile cache TTL in seconds (default: 60, 0 disables caching)
    pub profile_cache_ttl_secs: u64,

    /// Log level used when `RUST_LOG` is not set (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `IDENTITY_API_BASE_URL`: Base URL for the identity API
    /// - `IDENTITY_API_TOKEN`: Bearer token for authentication
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds, 1 to 3600 (default: 10)
    /// - `PROFILE_CACHE_TTL_SECONDS`: Profile cache TTL, at most one week (default: 60)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        Self::load_dotenv(dotenvy::dotenv())?;

        let api_url = env::var("IDENTITY_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_BASE_URL".to_string()))?;

        let api_token = env::var("IDENTITY_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_TOKEN".to_string()))?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_API_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&request_timeout) {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: format!("Must be between 1 and {} seconds", MAX_REQUEST_TIMEOUT_SECS),
            });
        }

        let profile_cache_ttl_secs = Self::parse_env_u64("PROFILE_CACHE_TTL_SECONDS", 60)?;
        if profile_cache_ttl_secs > MAX_PROFILE_CACHE_TTL_SECS {
            return Err(ConfigError::InvalidValue {
                var: "PROFILE_CACHE_TTL_SECONDS".to_string(),
                reason: format!("Must be at most {} seconds", MAX_PROFILE_CACHE_TTL_SECS),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_url,
            api_token,
            request_timeout,
            profile_cache_ttl_secs,
            log_level,
        })
    }

    /// Build a configuration for a known endpoint with default settings.
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Whether the profile cache should be used at all.
    pub fn profile_cache_enabled(&self) -> bool {
        self.profile_cache_ttl_secs > 0
    }

    /// A missing `.env` file is fine; one that cannot be read or parsed is not.
    fn load_dotenv<T>(result: Result<T, dotenvy::Error>) -> ConfigResult<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::DotenvError(e.to_string())),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a non-negative number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::new(),
            api_token: String::new(),
            request_timeout: 10,
            profile_cache_ttl_secs: 60,
            log_level: "error".to_string(),
        }
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("profile_cache_ttl_secs", &self.profile_cache_ttl_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
