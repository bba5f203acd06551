//! Error types for the filter core.
//!
//! - [`FetchError`] - Transport failures while requesting a list fragment
//! - [`ConfigError`] - Invalid widget configuration

use thiserror::Error;

/// Network/fetch-related errors for list fragment requests.
///
/// A non-2xx status is deliberately absent: the backend uses it to mean
/// "nothing to update", see [`crate::FetchOutcome::NoUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (offline, CORS, aborted)
    #[error("Network error: {0}")]
    Network(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Response body is not a valid fragment payload
    #[error("Invalid fragment payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration attribute is not valid JSON for [`crate::FilterConfig`].
    #[error("invalid filter configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A debounce window of zero would fire on every keystroke.
    #[error("debounce window for {0} must be greater than zero")]
    ZeroDebounce(&'static str),
}
