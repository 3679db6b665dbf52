//! Network transport seam.
//!
//! The loader only needs status, reason phrase and body bytes for a locator.
//! Concrete transports live outside this crate.

use std::sync::Arc;

use async_trait::async_trait;

use crate::locator::Locator;

/// A response as seen by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Reason phrase for the status (may be empty).
    pub reason: String,

    /// Response headers, in wire order.
    pub headers: Vec<(String, String)>,

    /// Response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// A response with no headers.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure to obtain any response at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// DNS failure, refused connection, TLS failure, timeout.
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// The response started but its body could not be read.
    #[error("failed to read response body: {message}")]
    Body { message: String },
}

/// Fetches module sources.
///
/// Implementations issue one independent request per call: no caching and
/// no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, locator: &Locator) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch(&self, locator: &Locator) -> Result<TransportResponse, TransportError> {
        (**self).fetch(locator).await
    }
}
