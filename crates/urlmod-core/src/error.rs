//! Error types for the resolve and load hooks.

/// Errors raised by this layer's own decisions.
///
/// Errors produced by the rest of the hook chain never pass through this
/// type; the dispatchers hand them back to the host untouched.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The server answered with a non-success status.
    #[error("request to download module source from {locator} failed with HTTP status {status} {reason}")]
    Fetch {
        locator: String,
        status: u16,
        reason: String,
    },

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("network error while fetching {locator}: {message}")]
    Network { locator: String, message: String },

    /// A locator could not be built from the given input.
    #[error("invalid locator: {input} - {reason}")]
    InvalidLocator { input: String, reason: String },

    /// Source bytes were requested as text but are not valid UTF-8.
    #[error("source of {locator} is not valid UTF-8: {message}")]
    Decode { locator: String, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl HookError {
    /// Whether the failure happened on the wire (status or connectivity).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Network { .. })
    }

    /// The locator the failure refers to, when there is one.
    pub fn locator(&self) -> Option<&str> {
        match self {
            Self::Fetch { locator, .. }
            | Self::Network { locator, .. }
            | Self::Decode { locator, .. } => Some(locator),
            Self::InvalidLocator { input, .. } => Some(input),
            Self::Config { .. } => None,
        }
    }

    /// HTTP status of a failed fetch.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for hook operations.
pub type HookResult<T> = Result<T, HookError>;
