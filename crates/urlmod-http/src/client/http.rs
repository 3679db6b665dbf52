//! HTTP layer: the single GET and its status/reason mapping.
//!
//! This is the ONLY place that touches reqwest responses. Whether a status
//! counts as failure is the loader's call, not ours.

use hyper::ext::ReasonPhrase;
use tracing::debug;
use urlmod_core::{Locator, TransportError, TransportResponse};

use super::helpers::{collect_headers, connect_error, reason_phrase};

/// HTTP backend (holds the reqwest client).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// Issue one GET; never retried.
    pub(crate) async fn get(
        &self,
        locator: &Locator,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(locator.as_str())
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();
        let reason = reason_phrase(
            status,
            response
                .extensions()
                .get::<ReasonPhrase>()
                .map(ReasonPhrase::as_bytes),
        );
        let headers = collect_headers(response.headers());
        debug!(locator = %locator, status = status.as_u16(), "received response");

        let body = response.bytes().await.map_err(|e| TransportError::Body {
            message: e.to_string(),
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason,
            headers,
            body: body.to_vec(),
        })
    }
}
