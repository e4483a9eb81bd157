//! NewsAPI client for top headlines and keyword search

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, instrument};

use newscheck_core::{Article, Category};

use crate::budget::{bounded, DATA_API_TIMEOUT};
use crate::error::SourceError;
use crate::normalize::from_news_api;
use crate::traits::HeadlineSource;
use crate::types::NewsApiResponse;

pub const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

/// NewsAPI client
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl NewsApiClient {
    /// Create a new client. Without a key every call yields the unavailable sentinel.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: NEWS_API_BASE_URL.to_string(),
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

    /// `/top-headlines` for one country and category
    #[instrument(skip(self), fields(category = %category))]
    pub async fn request_top_headlines(
        &self,
        country: &str,
        category: Category,
        page_size: usize,
    ) -> Result<Vec<Article>, SourceError> {
        let params = [
            ("country", country.to_string()),
            ("category", category.as_str().to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let articles = self.get("top-headlines", &params, Some(category)).await?;
        info!(
            "Fetched {} headlines for {}/{}",
            articles.len(),
            country,
            category
        );
        Ok(articles)
    }

    /// `/everything` keyword search
    #[instrument(skip(self))]
    pub async fn request_search(
        &self,
        query: &str,
        language: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, SourceError> {
        let params = [
            ("q", query.to_string()),
            ("language", language.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let articles = self.get("everything", &params, None).await?;
        info!("Found {} articles for search '{}'", articles.len(), query);
        Ok(articles)
    }

    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        category: Option<Category>,
    ) -> Result<Vec<Article>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingCredential("NEWS_API_KEY"))?;

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .header("X-Api-Key", api_key)
            .query(params)
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
        parse_news_api_body(&body, category)
    }
}

/// Validate a NewsAPI body and normalize its articles
pub fn parse_news_api_body(
    body: &str,
    category: Option<Category>,
) -> Result<Vec<Article>, SourceError> {
    let parsed: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| SourceError::ParseError(e.to_string()))?;

    if parsed.status != "ok" {
        return Err(SourceError::ApiError {
            status: 200,
            message: format!(
                "{}: {}",
                parsed.code.unwrap_or_else(|| "unknown".to_string()),
                parsed.message.unwrap_or_else(|| "Unknown error".to_string())
            ),
        });
    }

    let articles = parsed
        .articles
        .ok_or_else(|| SourceError::ParseError("missing articles array".to_string()))?;

    debug!(
        "NewsAPI reported {} total results",
        parsed.total_results.unwrap_or_default()
    );

    let fetched_at = Utc::now();
    Ok(articles
        .into_iter()
        .map(|a| from_news_api(a, category, fetched_at))
        .collect())
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(
        &self,
        country: &str,
        category: Category,
        page_size: usize,
    ) -> Vec<Article> {
        let label = format!("newsapi:{}:{}", country, category);
        bounded(
            &label,
            self.timeout,
            self.request_top_headlines(country, category, page_size),
        )
        .await
        .unwrap_or_default()
    }

    async fn search(&self, query: &str, language: &str, page_size: usize) -> Vec<Article> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        bounded(
            "newsapi:search",
            self.timeout,
            self.request_search(query, language, page_size),
        )
        .await
        .unwrap_or_default()
    }
}
