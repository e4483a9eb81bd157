//! Google Fact Check Tools client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use newscheck_core::FactCheckClaim;

use crate::budget::{bounded, DATA_API_TIMEOUT};
use crate::error::SourceError;
use crate::traits::FactCheckSource;
use crate::types::FactCheckResponse;

pub const FACT_CHECK_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1";

/// Results requested when looking up a single claim
pub const CLAIM_LOOKUP_RESULTS: usize = 5;

pub struct FactCheckClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl FactCheckClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: FACT_CHECK_BASE_URL.to_string(),
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

    #[instrument(skip(self))]
    pub async fn request_search(
        &self,
        query: &str,
        language: &str,
        max_results: usize,
    ) -> Result<Vec<FactCheckClaim>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingCredential("GOOGLE_FACT_CHECK_API_KEY"))?;

        let page_size = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/claims:search", self.base_url))
            .query(&[
                ("key", api_key),
                ("query", query),
                ("languageCode", language),
                ("pageSize", page_size.as_str()),
            ])
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
        let parsed: FactCheckResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::ParseError(e.to_string()))?;

        // An empty object means no matches
        let mut claims = parsed.claims.unwrap_or_default();
        claims.truncate(max_results);
        info!("Found {} fact checks for '{}'", claims.len(), query);
        Ok(claims)
    }
}

#[async_trait]
impl FactCheckSource for FactCheckClient {
    async fn search_fact_checks(
        &self,
        query: &str,
        language: &str,
        max_results: usize,
    ) -> Vec<FactCheckClaim> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        bounded(
            "factcheck:search",
            self.timeout,
            self.request_search(query, language, max_results),
        )
        .await
        .unwrap_or_default()
    }
}
