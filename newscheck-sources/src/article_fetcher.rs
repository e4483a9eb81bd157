//! Readable text from an article page, for the misinformation detector

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Url};
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use newscheck_core::is_public_host;

use crate::budget::{bounded, DATA_API_TIMEOUT};
use crate::error::SourceError;
use crate::traits::ArticleContentSource;

/// Cap on extracted text handed to the models
pub const MAX_CONTENT_CHARS: usize = 8000;

/// Selectors tried in order; the first one yielding text wins
const CONTENT_SELECTORS: [&str; 3] = ["article", "main", "p"];

const MAX_REDIRECTS: usize = 5;

/// Fetches caller-supplied URLs, so every hop (the first request and each
/// redirect) must point at a public host unless private hosts are allowed.
pub struct ArticleFetcher {
    client: Client,
    timeout: Duration,
    allow_private_hosts: bool,
}

impl Default for ArticleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleFetcher {
    pub fn new() -> Self {
        Self {
            client: build_client(false),
            timeout: DATA_API_TIMEOUT,
            allow_private_hosts: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Permit loopback and private-network hosts (intranet deployments)
    pub fn allow_private_hosts(mut self) -> Self {
        self.allow_private_hosts = true;
        self.client = build_client(true);
        self
    }

    #[instrument(skip(self))]
    pub async fn request_text(&self, url: &str) -> Result<String, SourceError> {
        let target =
            Url::parse(url).map_err(|e| SourceError::RequestFailed(format!("{}: {}", url, e)))?;
        if !self.allow_private_hosts && !is_public_host(&target) {
            return Err(SourceError::BlockedHost(
                target.host_str().unwrap_or_default().to_string(),
            ));
        }

        let response = self
            .client
            .get(target)
            .header("User-Agent", "Mozilla/5.0 (compatible; NewsCheck/1.0)")
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let html = response.text().await?;
        let text = extract_readable_text(&html);
        if text.is_empty() {
            return Err(SourceError::ParseError(format!("no readable text at {}", url)));
        }
        debug!(chars = text.chars().count(), "Extracted article text");
        Ok(text)
    }
}

fn build_client(allow_private_hosts: bool) -> Client {
    let policy = Policy::custom(move |attempt| {
        if follow_redirect(attempt.url(), attempt.previous().len(), allow_private_hosts) {
            attempt.follow()
        } else {
            warn!(location = %attempt.url(), "Redirect not followed");
            attempt.stop()
        }
    });
    Client::builder()
        .redirect(policy)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// A stopped redirect surfaces as a non-success response
fn follow_redirect(target: &Url, hops: usize, allow_private_hosts: bool) -> bool {
    hops < MAX_REDIRECTS && (allow_private_hosts || is_public_host(target))
}

/// Text of the first matching content region, whitespace-collapsed and capped
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let text = CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .map(|selector| {
            document
                .select(&selector)
                .map(|el| clean_text(&el.text().collect::<String>()))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    if text.chars().count() > MAX_CONTENT_CHARS {
        text.chars().take(MAX_CONTENT_CHARS).collect()
    } else {
        text
    }
}

fn clean_text(text: &str) -> String {
    text.lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ArticleContentSource for ArticleFetcher {
    async fn fetch_text(&self, url: &str) -> Option<String> {
        bounded("article", self.timeout, self.request_text(url)).await
    }
}
