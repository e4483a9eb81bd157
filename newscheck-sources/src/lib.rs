//! Upstream clients for news aggregation and claim checking
//!
//! This crate provides timeout-bounded clients for:
//! - NewsAPI: top headlines per country/category and keyword search
//! - RSS/Atom feeds: general news and fact-checking outlets
//! - Google Fact Check Tools: published fact checks for a claim
//! - ClaimBuster: claim-worthiness scoring
//! - Article pages: readable text extraction
//!
//! Every client implements one of the traits in [`traits`] and reports an
//! unavailable upstream as an empty list or `None`, never as an error.

pub mod article_fetcher;
pub mod budget;
pub mod claim_buster;
pub mod error;
pub mod fact_check;
pub mod news_api;
pub mod normalize;
pub mod rss_client;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use article_fetcher::ArticleFetcher;
pub use budget::{bounded, AI_MODEL_TIMEOUT, DATA_API_TIMEOUT};
pub use claim_buster::ClaimBusterClient;
pub use error::SourceError;
pub use fact_check::FactCheckClient;
pub use news_api::{NewsApiClient, NEWS_API_BASE_URL};
pub use normalize::strip_html;
pub use rss_client::{fact_check_feeds, news_feeds, RssClient, RssFeed};
pub use traits::{ArticleContentSource, ClaimScorer, FactCheckSource, FeedSource, HeadlineSource};
