//! Fact-check search results and claim-worthiness scores

use serde::{Deserialize, Serialize};

/// Organisation that published a fact-check review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckPublisher {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
}

/// One published review of a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckReview {
    pub publisher: FactCheckPublisher,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,
    /// Publisher's rating, e.g. "False" or "Mostly true"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textual_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// A claim together with the reviews that assessed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckClaim {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_date: Option<String>,
    #[serde(rename = "claimReview", default)]
    pub reviews: Vec<FactCheckReview>,
}

/// How worth fact-checking a piece of text is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimWorthiness {
    pub text: String,
    /// Mean sentence score, 0.0 - 1.0
    pub score: f64,
    pub is_fact_check_worthy: bool,
}

/// Threshold above which text is considered worth fact-checking
pub const CLAIM_WORTHY_THRESHOLD: f64 = 0.5;

impl ClaimWorthiness {
    pub fn from_score(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            is_fact_check_worthy: score > CLAIM_WORTHY_THRESHOLD,
        }
    }
}

/// Optional enrichment gathered alongside a claim verification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worthiness: Option<ClaimWorthiness>,
    pub fact_checks: Vec<FactCheckClaim>,
}
