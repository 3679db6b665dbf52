//! reqwest-backed transport for the load hook.
//!
//! Public API: no response handling. All reqwest response access in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::debug;
use urlmod_core::{HookError, HookResult, Locator, Transport, TransportError, TransportResponse};

use crate::config::HttpTransportConfig;

mod helpers;
mod http;

use http::HttpBackend;

/// Fetches module sources over HTTP(S).
///
/// Every call issues its own request; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpBackend,
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> HookResult<Self> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| HookError::Config {
                message: format!("invalid user agent '{}': {}", config.user_agent, e),
            })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .redirect(redirect_policy(config.max_redirects));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| HookError::Config {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http: HttpBackend { client },
            config,
        })
    }

    pub fn from_env() -> HookResult<Self> {
        Self::new(HttpTransportConfig::from_env()?)
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, locator: &Locator) -> Result<TransportResponse, TransportError> {
        debug!(locator = %locator, "GET module source");
        self.http.get(locator).await
    }
}

fn redirect_policy(max_redirects: usize) -> Policy {
    if max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(max_redirects)
    }
}
