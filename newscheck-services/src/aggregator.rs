//! News aggregation engine
//!
//! Every request fans out to one or more upstream branches, waits for all of
//! them, substitutes fallback content branch by branch, then merges, sorts
//! newest-first and truncates. Requests never fail: problems surface through
//! `used_fallback` and `error` on the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use newscheck_core::{sort_and_truncate, AggregationResult, Article, Category, CategorizedNews};
use newscheck_sources::{fact_check_feeds, news_feeds, FeedSource, HeadlineSource, RssFeed};

use crate::fallback::FallbackCatalog;

/// Banner shown when every branch of a request was served from fallback content
pub const ALL_SOURCES_FAILED: &str =
    "Live news sources are unavailable; showing saved headlines instead";

/// Set when nothing, not even fallback content, could be produced
pub const NO_NEWS_FOUND: &str = "No news items found from any source";

/// Per-category cap for the category views
pub const CATEGORY_MAX: usize = 5;

/// Cap for the latest, trending and feed views
pub const FEED_MAX: usize = 10;

/// Settled output of one branch
#[derive(Debug)]
struct Branch {
    items: Vec<Article>,
    used_fallback: bool,
}

impl Branch {
    fn live(items: Vec<Article>) -> Self {
        Self {
            items,
            used_fallback: false,
        }
    }

    fn fallback(items: Vec<Article>) -> Self {
        Self {
            items,
            used_fallback: true,
        }
    }
}

/// Concatenate branches in input order, then sort and truncate
fn merge(branches: Vec<Branch>, max: usize) -> AggregationResult<Article> {
    let all_fell_back = !branches.is_empty() && branches.iter().all(|b| b.used_fallback);
    let used_fallback = branches.iter().any(|b| b.used_fallback);

    let mut items: Vec<Article> = branches.into_iter().flat_map(|b| b.items).collect();
    sort_and_truncate(&mut items, max);

    let error = if items.is_empty() {
        Some(NO_NEWS_FOUND.to_string())
    } else if all_fell_back {
        Some(ALL_SOURCES_FAILED.to_string())
    } else {
        None
    };

    AggregationResult {
        items,
        used_fallback,
        error,
    }
}

/// Fan-out/fan-in aggregation over the headline API and RSS feeds
pub struct NewsAggregator {
    headlines: Arc<dyn HeadlineSource>,
    feeds: Arc<dyn FeedSource>,
    fallback: Arc<FallbackCatalog>,
    news_feeds: Vec<RssFeed>,
    fact_check_feeds: Vec<RssFeed>,
}

impl NewsAggregator {
    pub fn new(
        headlines: Arc<dyn HeadlineSource>,
        feeds: Arc<dyn FeedSource>,
        fallback: Arc<FallbackCatalog>,
    ) -> Self {
        info!("Initializing NewsAggregator");
        Self {
            headlines,
            feeds,
            fallback,
            news_feeds: news_feeds(),
            fact_check_feeds: fact_check_feeds(),
        }
    }

    // ========================================================================
    // Headline API operations
    // ========================================================================

    /// Top headlines for one country and category, never empty while the
    /// fallback catalog has content for `category`.
    #[instrument(skip(self))]
    pub async fn fetch_top_headlines(
        &self,
        country: &str,
        category: Category,
        page_size: usize,
    ) -> AggregationResult<Article> {
        let now = Utc::now();
        let branch = self.headline_branch(country, category, page_size, now).await;
        merge(vec![branch], page_size)
    }

    /// One branch per category, all issued concurrently
    #[instrument(skip(self))]
    pub async fn fetch_news_by_categories(&self, country: &str, page_size: usize) -> CategorizedNews {
        let now = Utc::now();
        let branches = self.category_branches(country, page_size, now).await;

        let all_fell_back = branches.iter().all(|(_, b)| b.used_fallback);
        let mut news = CategorizedNews::new();
        for (category, branch) in branches {
            news.insert(category, merge(vec![branch], page_size));
        }
        if all_fell_back {
            warn!(country, "Every category fell back");
            news.error = Some(ALL_SOURCES_FAILED.to_string());
        }
        news
    }

    /// Keyword search; an unavailable search falls back to every catalog article.
    #[instrument(skip(self))]
    pub async fn search_news(
        &self,
        query: &str,
        language: &str,
        page_size: usize,
    ) -> AggregationResult<Article> {
        if query.trim().is_empty() {
            return AggregationResult::live(Vec::new());
        }

        let now = Utc::now();
        let live = self.headlines.search(query, language, page_size).await;
        let branch = if live.is_empty() {
            warn!(query, "Search fell back");
            Branch::fallback(self.fallback.all_articles(now))
        } else {
            debug!(query, count = live.len(), "Search succeeded");
            Branch::live(live)
        };
        merge(vec![branch], page_size)
    }

    /// Category view: three US and two UK headlines per category, five kept
    #[instrument(skip(self))]
    pub async fn categorized_news(&self) -> CategorizedNews {
        let now = Utc::now();
        let (us, gb) = tokio::join!(
            self.category_branches("us", 3, now),
            self.category_branches("gb", 2, now)
        );

        let all_fell_back = us
            .iter()
            .chain(gb.iter())
            .all(|(_, b)| b.used_fallback);

        let mut news = CategorizedNews::new();
        for ((category, us_branch), (_, gb_branch)) in us.into_iter().zip(gb) {
            news.insert(category, merge(vec![us_branch, gb_branch], CATEGORY_MAX));
        }
        if all_fell_back {
            warn!("Every category branch fell back");
            news.error = Some(ALL_SOURCES_FAILED.to_string());
        }
        news
    }

    /// Re-fetch a single category, trying the UAE edition when US and UK yield nothing
    #[instrument(skip(self))]
    pub async fn refresh_category(&self, category: Category) -> AggregationResult<Article> {
        let now = Utc::now();
        let (us, gb) = tokio::join!(
            self.headline_branch("us", category, 3, now),
            self.headline_branch("gb", category, 2, now)
        );

        let result = merge(vec![us, gb], CATEGORY_MAX);
        if !result.is_empty() {
            return result;
        }

        info!(%category, "No items for category, trying alternate locale");
        let alternate = self.headline_branch("ae", category, CATEGORY_MAX, now).await;
        merge(vec![alternate], CATEGORY_MAX)
    }

    /// General headlines from three editions, French edition as the alternate
    #[instrument(skip(self))]
    pub async fn latest_news(&self) -> AggregationResult<Article> {
        let now = Utc::now();
        let (us, gb, ae) = tokio::join!(
            self.headline_branch("us", Category::General, 5, now),
            self.headline_branch("gb", Category::General, 3, now),
            self.headline_branch("ae", Category::General, 2, now)
        );

        let result = merge(vec![us, gb, ae], FEED_MAX);
        if !result.is_empty() {
            return result;
        }

        info!("No latest news, trying alternate locale");
        let alternate = self
            .headline_branch("fr", Category::General, FEED_MAX, now)
            .await;
        merge(vec![alternate], FEED_MAX)
    }

    /// RSS news feeds plus US general headlines
    #[instrument(skip(self))]
    pub async fn trending_news(&self) -> AggregationResult<Article> {
        let now = Utc::now();
        let (mut branches, headlines) = tokio::join!(
            self.feed_branches(&self.news_feeds, now),
            self.headline_branch("us", Category::General, 5, now)
        );
        branches.push(headlines);
        merge(branches, FEED_MAX)
    }

    // ========================================================================
    // RSS operations
    // ========================================================================

    /// A single feed, falling back to that feed's catalog items
    #[instrument(skip(self), fields(feed = %feed.name))]
    pub async fn fetch_feed(&self, feed: &RssFeed) -> AggregationResult<Article> {
        let now = Utc::now();
        let branch = self.feed_branch(feed, now).await;
        merge(vec![branch], usize::MAX)
    }

    /// General news feeds merged
    #[instrument(skip(self))]
    pub async fn fetch_all_rss(&self) -> AggregationResult<Article> {
        let now = Utc::now();
        merge(self.feed_branches(&self.news_feeds, now).await, FEED_MAX)
    }

    /// Fact-checking outlet feeds merged
    #[instrument(skip(self))]
    pub async fn fetch_all_fact_checks(&self) -> AggregationResult<Article> {
        let now = Utc::now();
        merge(self.feed_branches(&self.fact_check_feeds, now).await, FEED_MAX)
    }

    // ========================================================================
    // Branches
    // ========================================================================

    async fn headline_branch(
        &self,
        country: &str,
        category: Category,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Branch {
        let live = self
            .headlines
            .top_headlines(country, category, page_size)
            .await;

        if live.is_empty() {
            warn!(country, %category, "Headline branch fell back");
            Branch::fallback(self.fallback.category_articles(category, now))
        } else {
            debug!(country, %category, count = live.len(), "Headline branch succeeded");
            Branch::live(live)
        }
    }

    /// One headline branch per category, in [`Category::ALL`] order
    async fn category_branches(
        &self,
        country: &str,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Vec<(Category, Branch)> {
        let branches = join_all(
            Category::ALL
                .into_iter()
                .map(|category| self.headline_branch(country, category, page_size, now)),
        )
        .await;

        Category::ALL.into_iter().zip(branches).collect()
    }

    async fn feed_branch(&self, feed: &RssFeed, now: DateTime<Utc>) -> Branch {
        let live = self.feeds.fetch_feed(feed).await;

        if live.is_empty() {
            warn!(feed = %feed.name, "Feed branch fell back");
            Branch::fallback(self.fallback.feed_articles(&feed.name, now))
        } else {
            debug!(feed = %feed.name, count = live.len(), "Feed branch succeeded");
            Branch::live(live)
        }
    }

    async fn feed_branches(&self, feeds: &[RssFeed], now: DateTime<Utc>) -> Vec<Branch> {
        join_all(feeds.iter().map(|feed| self.feed_branch(feed, now))).await
    }
}
