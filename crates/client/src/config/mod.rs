//! Client configuration
//!
//! Loads configuration from environment variables with documented defaults.
//!
//! ## Environment Variables
//! - `FOLIO_API_BASE_URL`: Base URL of the backend API
//! - `FOLIO_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `FOLIO_API_MAX_RETRIES`: Process-wide refresh attempt budget
//! - `FOLIO_API_RETRY_DELAY_MS`: Delay between transport-level retries
//!
//! Unset variables fall back to the defaults in `folio_domain::constants`;
//! set-but-invalid values are a configuration error.

pub mod endpoints;

use std::time::Duration;

use folio_domain::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_REFRESH_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_SECS,
};
use folio_domain::{FolioError, Result};
use serde::{Deserialize, Serialize};

pub use endpoints::Endpoints;

/// API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    /// Process-wide request timeout.
    pub timeout: Duration,
    /// Total refresh attempts allowed before 401s become terminal.
    pub max_refresh_attempts: u32,
    /// Delay between transport-level retries.
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_refresh_attempts: DEFAULT_MAX_REFRESH_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given base URL and default timings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: trim_trailing_slash(base_url.into()), ..Self::default() }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    /// Returns `FolioError::Config` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("FOLIO_API_BASE_URL")
            .map_or(defaults.base_url, trim_trailing_slash);

        let timeout = match env_parse::<u64>("FOLIO_API_TIMEOUT_SECS")? {
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };

        let max_refresh_attempts =
            env_parse::<u32>("FOLIO_API_MAX_RETRIES")?.unwrap_or(defaults.max_refresh_attempts);

        let retry_delay = match env_parse::<u64>("FOLIO_API_RETRY_DELAY_MS")? {
            Some(ms) => Duration::from_millis(ms),
            None => defaults.retry_delay,
        };

        tracing::debug!(
            base_url = %base_url,
            timeout_secs = timeout.as_secs(),
            max_refresh_attempts,
            "client configuration loaded"
        );

        Ok(Self { base_url, timeout, max_refresh_attempts, retry_delay })
    }

    /// Endpoint table rooted at this configuration's base URL.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url)
    }
}

fn trim_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| FolioError::Config(format!("Invalid {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
