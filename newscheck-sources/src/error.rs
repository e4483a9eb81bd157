//! Error types for the upstream clients

use thiserror::Error;

/// Errors that can occur while talking to an upstream.
///
/// These never leave the crate's trait implementations: [`crate::bounded`]
/// logs them and turns them into the unavailable sentinel.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Response did not match the expected schema
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Credential not configured for this upstream
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Target host is loopback, private or otherwise not publicly routable
    #[error("Refusing to fetch non-public host: {0}")]
    BlockedHost(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::ParseError(e.to_string())
        } else {
            SourceError::RequestFailed(e.to_string())
        }
    }
}
