//! ClaimBuster claim-worthiness scoring

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use newscheck_core::ClaimWorthiness;

use crate::budget::{bounded, DATA_API_TIMEOUT};
use crate::error::SourceError;
use crate::traits::ClaimScorer;
use crate::types::ClaimBusterRequest;

pub const CLAIMBUSTER_BASE_URL: &str = "https://idir.uta.edu/claimbuster/api/v2";

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    results: ScoreResults,
}

/// The API returns a list for multi-sentence input and a bare object otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreResults {
    Many(Vec<SentenceScore>),
    One(SentenceScore),
}

#[derive(Debug, Deserialize)]
struct SentenceScore {
    score: f64,
}

pub struct ClaimBusterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ClaimBusterClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: CLAIMBUSTER_BASE_URL.to_string(),
            timeout: DATA_API_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, text))]
    pub async fn request_score(&self, text: &str) -> Result<ClaimWorthiness, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingCredential("CLAIMBUSTER_API_KEY"))?;

        let response = self
            .client
            .post(format!("{}/score/text/", self.base_url))
            .header("x-api-key", api_key)
            .json(&ClaimBusterRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: ScoreResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::ParseError(e.to_string()))?;

        let scores = match parsed.results {
            ScoreResults::Many(scores) => scores,
            ScoreResults::One(score) => vec![score],
        };
        if scores.is_empty() {
            return Err(SourceError::ParseError("no sentence scores".to_string()));
        }

        let mean = scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64;
        debug!(sentences = scores.len(), mean, "Scored claim");
        Ok(ClaimWorthiness::from_score(text, mean))
    }
}

#[async_trait]
impl ClaimScorer for ClaimBusterClient {
    async fn score(&self, text: &str) -> Option<ClaimWorthiness> {
        if text.trim().is_empty() {
            return None;
        }
        bounded("claimbuster", self.timeout, self.request_score(text)).await
    }
}
