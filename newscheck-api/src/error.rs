//! Mapping of service errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use newscheck_core::NewsCheckError;

/// Handler error rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub NewsCheckError);

impl From<NewsCheckError> for ApiError {
    fn from(e: NewsCheckError) -> Self {
        ApiError(e)
    }
}

/// Unreadable request bodies are a client mistake, reported in the usual shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(NewsCheckError::validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            NewsCheckError::Validation(_) => StatusCode::BAD_REQUEST,
            NewsCheckError::VerificationFailed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        // Validation messages are written for end users; the rest get the variant prefix
        let message = match self.0 {
            NewsCheckError::Validation(msg) => msg,
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(NewsCheckError::validation("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(NewsCheckError::verification_failed("x")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(NewsCheckError::internal("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
