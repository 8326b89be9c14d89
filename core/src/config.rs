//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const BASE_URL_VAR: &str = "EDULOOP_API_BASE";
const TIMEOUT_VAR: &str = "EDULOOP_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin every endpoint is resolved against, e.g. `http://host:5000/api`.
    pub base_url: String,
    /// Upper bound for one call. `None` defers to the transport's defaults.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `EDULOOP_API_BASE` and `EDULOOP_API_TIMEOUT_SECS`, falling back
    /// to the defaults for unset variables. A timeout of `0` disables it.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            let base_url = base_url.trim();
            if base_url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR });
            }
            config.base_url = base_url.to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}
