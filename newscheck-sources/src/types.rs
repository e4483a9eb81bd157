//! Wire types for the upstream JSON APIs

use serde::{Deserialize, Serialize};

use newscheck_core::FactCheckClaim;

// ============================================================================
// NewsAPI Types
// ============================================================================

/// Envelope returned by `/top-headlines` and `/everything`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    /// "ok" or "error"
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default)]
    pub articles: Option<Vec<NewsApiArticle>>,
    /// Error code when status is "error"
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Article as NewsAPI reports it; every field may be null
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: NewsApiSourceRef,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Publisher reference inside a NewsAPI article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsApiSourceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// Google Fact Check Tools Types
// ============================================================================

/// Response of `claims:search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckResponse {
    #[serde(default)]
    pub claims: Option<Vec<FactCheckClaim>>,
}

// ============================================================================
// ClaimBuster Types
// ============================================================================

/// Request body for the ClaimBuster scoring endpoint
#[derive(Debug, Serialize)]
pub struct ClaimBusterRequest<'a> {
    pub text: &'a str,
}
