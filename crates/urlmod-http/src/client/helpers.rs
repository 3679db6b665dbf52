//! Pure helpers: header collection, reason phrases, error mapping.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use urlmod_core::TransportError;

/// Copy headers with textual values, in wire order.
pub(crate) fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Reason phrase for a status.
///
/// Prefers the phrase the server sent; hyper only records it when it differs
/// from the canonical one. Empty when neither exists.
pub(crate) fn reason_phrase(status: StatusCode, server: Option<&[u8]>) -> String {
    match server {
        Some(phrase) => String::from_utf8_lossy(phrase).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Map a failed send into a transport error.
pub(crate) fn connect_error(err: reqwest::Error) -> TransportError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    TransportError::Connect { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE, ETAG};

    #[test]
    fn test_reason_phrase_falls_back_to_canonical() {
        assert_eq!(reason_phrase(StatusCode::NOT_FOUND, None), "Not Found");
        assert_eq!(reason_phrase(StatusCode::OK, None), "OK");
        assert_eq!(reason_phrase(StatusCode::from_u16(599).unwrap(), None), "");
    }

    #[test]
    fn test_reason_phrase_prefers_server_phrase() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(
            reason_phrase(status, Some(b"Origin Overloaded")),
            "Origin Overloaded"
        );
        assert_eq!(
            reason_phrase(StatusCode::NOT_FOUND, Some(b"Nope")),
            "Nope"
        );
    }

    #[test]
    fn test_collect_headers_skips_binary_values() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/wasm"));
        headers.insert(ETAG, HeaderValue::from_bytes(b"\"\xff\"").unwrap());

        let collected = collect_headers(&headers);
        assert_eq!(
            collected,
            vec![("content-type".to_string(), "application/wasm".to_string())]
        );
    }
}
