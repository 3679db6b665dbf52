//! HTTP transport configuration.

use serde::{Deserialize, Serialize};
use urlmod_core::{HookError, HookResult};

/// Default `User-Agent` header value.
pub const USER_AGENT_VALUE: &str = concat!("urlmod/", env!("CARGO_PKG_VERSION"));

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Request timeout in seconds. `None` waits for the server indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_user_agent() -> String {
    USER_AGENT_VALUE.to_string()
}

fn default_max_redirects() -> usize {
    10
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl HttpTransportConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `URLMOD_HTTP_TIMEOUT` | Request timeout in seconds (unset or `0`: none) |
    /// | `URLMOD_HTTP_USER_AGENT` | `User-Agent` override |
    /// | `URLMOD_HTTP_MAX_REDIRECTS` | Redirect limit (default: 10) |
    pub fn from_env() -> HookResult<Self> {
        let mut config = Self::default();

        if let Some(value) = env_value("URLMOD_HTTP_TIMEOUT") {
            let secs: u64 = parse_number("URLMOD_HTTP_TIMEOUT", &value)?;
            config.timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(value) = env_value("URLMOD_HTTP_USER_AGENT") {
            config.user_agent = value;
        }
        if let Some(value) = env_value("URLMOD_HTTP_MAX_REDIRECTS") {
            config.max_redirects = parse_number("URLMOD_HTTP_MAX_REDIRECTS", &value)?;
        }

        Ok(config)
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the `User-Agent`.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the redirect limit; `0` disables redirects.
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number<N: std::str::FromStr>(name: &str, value: &str) -> HookResult<N> {
    value.trim().parse().map_err(|_| HookError::Config {
        message: format!("{} must be a non-negative integer, got '{}'", name, value),
    })
}
