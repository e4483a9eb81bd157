//! Error types shared across the newscheck crates

use thiserror::Error;

/// Service-wide error type
///
/// Upstream failures are normally absorbed inside the source clients and never
/// reach this type; it is used for the few paths that must surface to the
/// caller (input validation, claim verification, configuration).
#[derive(Error, Debug)]
pub enum NewsCheckError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Claim verification failed: {0}")]
    VerificationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NewsCheckError {
    pub fn api(msg: impl Into<String>) -> Self {
        NewsCheckError::Api(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        NewsCheckError::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        NewsCheckError::Validation(msg.into())
    }

    pub fn verification_failed(msg: impl Into<String>) -> Self {
        NewsCheckError::VerificationFailed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        NewsCheckError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        NewsCheckError::Internal(msg.into())
    }

    /// Whether the error was caused by caller input rather than an upstream
    pub fn is_validation(&self) -> bool {
        matches!(self, NewsCheckError::Validation(_))
    }
}

/// Result type alias for newscheck operations
pub type NewsCheckResult<T> = Result<T, NewsCheckError>;
