//! Article analysis and claim verification endpoints
//!
//! Input is validated here, before any upstream call is made.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use newscheck_core::{
    validate_article_url, validate_claim_text, AnalysisState, ArticleAnalysis, ClaimContext,
    ClaimVerification,
};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    #[serde(default)]
    pub claim_text: String,
    /// Language for the fact-check lookup (context only)
    pub language: Option<String>,
}

/// Analysis plus the terminal state the round reached
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: ArticleAnalysis,
    pub state: AnalysisState,
}

/// Create analysis routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_article))
        .route("/verify", post(verify_claim))
        .route("/claims/context", post(claim_context))
}

/// POST /api/analyze - Summary and misinformation check for an article.
///
/// Analysis failures are reported inside the body; only a bad URL is an HTTP error.
async fn analyze_article(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    let url = validate_article_url(&request.url)?;
    info!(%url, "Analysing article");
    let analysis = state.analysis.analyze_article(url.as_str()).await;
    let reached = AnalysisState::from(analysis.outcome());
    Ok(Json(AnalyzeResponse {
        analysis,
        state: reached,
    }))
}

/// POST /api/verify - Verdict on a free-text claim
async fn verify_claim(
    State(state): State<AppState>,
    payload: Result<Json<ClaimRequest>, JsonRejection>,
) -> Result<Json<ClaimVerification>, ApiError> {
    let Json(request) = payload?;
    let claim = validate_claim_text(&request.claim_text)?;
    let verification = state.analysis.verify_claim(&claim).await?;
    Ok(Json(verification))
}

/// POST /api/claims/context - Claim-worthiness and published fact checks
async fn claim_context(
    State(state): State<AppState>,
    payload: Result<Json<ClaimRequest>, JsonRejection>,
) -> Result<Json<ClaimContext>, ApiError> {
    let Json(request) = payload?;
    let claim = validate_claim_text(&request.claim_text)?;
    let language = request
        .language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| "en".to_string());
    Ok(Json(state.analysis.claim_context(&claim, &language).await))
}

#[cfg(test)]
mod tests {
    use crate::routes::{app, test_support::*};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_analyze_rejects_invalid_url() {
        let (status, body) = call(
            app(state(true)),
            post_json("/api/analyze", json!({ "url": "not a url" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("valid"));
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let (status, body) = call(
            app(state(true)),
            post_json("/api/analyze", json!({ "url": "https://news.example/story" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["summary"], "A short summary");
        assert_eq!(body["fake_news"]["is_fake_news"], false);
        assert_eq!(body["state"], "success");
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_failure_is_reported_in_body() {
        let (status, body) = call(
            app(state(false)),
            post_json("/api/analyze", json!({ "url": "https://news.example/story" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], newscheck_services::BOTH_ANALYSES_FAILED);
        assert_eq!(body["state"], "failed");
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_body() {
        for uri in ["/api/analyze", "/api/verify", "/api/claims/context"] {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap();
            let (status, body) = call(app(state(true)), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}: {body}");
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_gets_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/verify")
            .body(Body::from(r#"{"claim_text": "The earth is flat"}"#))
            .unwrap();
        let (status, body) = call(app(state(true)), request).await;
        assert!(status.is_client_error());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_verify_short_claim_is_bad_request() {
        let (status, _) = call(
            app(state(true)),
            post_json("/api/verify", json!({ "claim_text": "   short  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(app(state(true)), post_json("/api/verify", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_claim() {
        let (status, body) = call(
            app(state(true)),
            post_json("/api/verify", json!({ "claim_text": "The earth is flat" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"], "LikelyFalse");

        let (status, body) = call(
            app(state(false)),
            post_json("/api/verify", json!({ "claim_text": "The earth is flat" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_claim_context() {
        let (status, body) = call(
            app(state(true)),
            post_json("/api/claims/context", json!({ "claim_text": "Garlic cures the flu" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["worthiness"]["is_fact_check_worthy"], true);
        assert_eq!(body["fact_checks"][0]["text"], "Garlic cures the flu");
    }
}
