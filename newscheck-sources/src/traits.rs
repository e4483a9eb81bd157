//! Seams between the upstream clients and the services that consume them
//!
//! Implementations enforce their own time budget and never fail: an
//! unavailable upstream shows up as an empty list or `None`.

use async_trait::async_trait;

use newscheck_core::{Article, Category, ClaimWorthiness, FactCheckClaim};

use crate::rss_client::RssFeed;

/// Paid headline API (top headlines per country/category, keyword search)
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn top_headlines(&self, country: &str, category: Category, page_size: usize)
        -> Vec<Article>;

    async fn search(&self, query: &str, language: &str, page_size: usize) -> Vec<Article>;
}

/// RSS/Atom feed reader
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, feed: &RssFeed) -> Vec<Article>;
}

/// Published fact-check search
#[async_trait]
pub trait FactCheckSource: Send + Sync {
    async fn search_fact_checks(
        &self,
        query: &str,
        language: &str,
        max_results: usize,
    ) -> Vec<FactCheckClaim>;
}

/// Claim-worthiness scoring
#[async_trait]
pub trait ClaimScorer: Send + Sync {
    async fn score(&self, text: &str) -> Option<ClaimWorthiness>;
}

/// Readable text of an article page
#[async_trait]
pub trait ArticleContentSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Option<String>;
}
