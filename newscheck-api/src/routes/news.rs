//! News aggregation and fact-check feed endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use newscheck_core::{AggregationResult, Article, CategorizedNews, Category, FactCheckClaim};

use crate::error::ApiError;
use crate::AppState;

const DEFAULT_PAGE_SIZE: usize = 10;
/// Largest page the headline API accepts
const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_COUNTRY: &str = "us";
const DEFAULT_LANGUAGE: &str = "en";

/// Query parameters for top headlines
#[derive(Debug, Deserialize)]
pub struct HeadlinesQuery {
    pub country: Option<String>,
    pub category: Option<String>,
    pub page_size: Option<usize>,
}

/// Query parameters for the per-country category listing
#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub country: Option<String>,
    pub page_size: Option<usize>,
}

/// Categorized news with the display label of every category
#[derive(Debug, Serialize)]
pub struct CategorizedNewsResponse {
    #[serde(flatten)]
    pub news: CategorizedNews,
    pub labels: BTreeMap<Category, &'static str>,
}

impl From<CategorizedNews> for CategorizedNewsResponse {
    fn from(news: CategorizedNews) -> Self {
        let labels = Category::ALL.into_iter().map(|c| (c, c.label())).collect();
        Self { news, labels }
    }
}

/// Query parameters for keyword search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub language: Option<String>,
    pub page_size: Option<usize>,
}

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news/headlines", get(get_headlines))
        .route("/news/categories", get(get_categorized_news))
        .route("/news/by-category", get(get_news_by_categories))
        .route("/news/categories/{category}/refresh", post(refresh_category))
        .route("/news/latest", get(get_latest_news))
        .route("/news/trending", get(get_trending_news))
        .route("/news/rss", get(get_rss_news))
        .route("/news/search", get(search_news))
        .route("/fact-checks/feeds", get(get_fact_check_feeds))
        .route("/fact-checks/search", get(search_fact_checks))
}

fn page_size(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// GET /api/news/headlines - Top headlines for one country and category
async fn get_headlines(
    State(state): State<AppState>,
    Query(params): Query<HeadlinesQuery>,
) -> Result<Json<AggregationResult<Article>>, ApiError> {
    let category = match params.category.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<Category>()?,
        _ => Category::General,
    };
    let country = non_blank(params.country, DEFAULT_COUNTRY);

    let result = state
        .aggregator
        .fetch_top_headlines(&country, category, page_size(params.page_size))
        .await;
    debug!(%country, %category, count = result.len(), "Served headlines");
    Ok(Json(result))
}

/// GET /api/news/categories - All seven categories from the US and UK editions
async fn get_categorized_news(State(state): State<AppState>) -> Json<CategorizedNewsResponse> {
    Json(state.aggregator.categorized_news().await.into())
}

/// GET /api/news/by-category - All seven categories for a single country
async fn get_news_by_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoriesQuery>,
) -> Json<CategorizedNewsResponse> {
    let country = non_blank(params.country, DEFAULT_COUNTRY);
    Json(
        state
            .aggregator
            .fetch_news_by_categories(&country, page_size(params.page_size))
            .await
            .into(),
    )
}

/// POST /api/news/categories/{category}/refresh - Re-fetch one category
async fn refresh_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<AggregationResult<Article>>, ApiError> {
    let category: Category = category.parse()?;
    Ok(Json(state.aggregator.refresh_category(category).await))
}

/// GET /api/news/latest
async fn get_latest_news(State(state): State<AppState>) -> Json<AggregationResult<Article>> {
    Json(state.aggregator.latest_news().await)
}

/// GET /api/news/trending
async fn get_trending_news(State(state): State<AppState>) -> Json<AggregationResult<Article>> {
    Json(state.aggregator.trending_news().await)
}

/// GET /api/news/rss - General news feeds merged
async fn get_rss_news(State(state): State<AppState>) -> Json<AggregationResult<Article>> {
    Json(state.aggregator.fetch_all_rss().await)
}

/// GET /api/news/search - Keyword search
async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<AggregationResult<Article>> {
    let language = non_blank(params.language, DEFAULT_LANGUAGE);
    Json(
        state
            .aggregator
            .search_news(params.q.trim(), &language, page_size(params.page_size))
            .await,
    )
}

/// GET /api/fact-checks/feeds - Fact-checking outlet feeds merged
async fn get_fact_check_feeds(State(state): State<AppState>) -> Json<AggregationResult<Article>> {
    Json(state.aggregator.fetch_all_fact_checks().await)
}

/// GET /api/fact-checks/search - Published fact checks matching a query
async fn search_fact_checks(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<FactCheckClaim>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Json(Vec::new());
    }
    let language = non_blank(params.language, DEFAULT_LANGUAGE);
    Json(
        state
            .fact_checks
            .search_fact_checks(query, &language, page_size(params.page_size))
            .await,
    )
}

#[cfg(test)]
mod tests {
    use super::page_size;
    use crate::routes::{app, test_support::*};
    use newscheck_core::Category;
    use axum::http::StatusCode;

    #[test]
    fn test_page_size_defaults_and_clamps() {
        assert_eq!(page_size(None), 10);
        assert_eq!(page_size(Some(0)), 1);
        assert_eq!(page_size(Some(500)), 100);
        assert_eq!(page_size(Some(25)), 25);
    }

    #[tokio::test]
    async fn test_headlines_live() {
        let (status, body) = call(
            app(state(true)),
            get("/api/news/headlines?country=gb&category=Sports&page_size=5"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_fallback"], false);
        assert_eq!(body["items"][0]["category"], "sports");
        assert!(body["items"][0]["title"].as_str().unwrap().starts_with("gb sports"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let (status, body) = call(
            app(state(true)),
            get("/api/news/headlines?category=weather"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("weather"));

        let (status, _) = call(
            app(state(true)),
            post_json("/api/news/categories/weather/refresh", serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories_fall_back_when_everything_is_down() {
        let (status, body) = call(app(state(false)), get("/api/news/categories")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_fallback"], true);
        assert!(body["error"].is_string());
        for category in Category::ALL {
            let items = body["categories"][category.as_str()]["items"].as_array().unwrap();
            assert!(!items.is_empty(), "{category}");
        }
    }

    #[tokio::test]
    async fn test_categorized_news_carries_labels() {
        let (status, body) = call(app(state(true)), get("/api/news/by-category?country=gb")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"]["health"], "صحة");
        for category in Category::ALL {
            assert_eq!(body["labels"][category.as_str()], category.label());
        }
    }

    #[tokio::test]
    async fn test_refresh_category_live() {
        let (status, body) = call(
            app(state(true)),
            post_json("/api/news/categories/health/refresh", serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_fallback"], false);
        assert!(body["items"].as_array().unwrap().len() <= 5);
    }

    #[tokio::test]
    async fn test_search_blank_query_is_empty() {
        let (status, body) = call(app(state(false)), get("/api/news/search?q=%20")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["items"].as_array().unwrap().is_empty());
        assert_eq!(body["used_fallback"], false);
    }

    #[tokio::test]
    async fn test_fact_check_routes() {
        let (status, body) = call(app(state(true)), get("/api/fact-checks/search?q=garlic")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["text"], "garlic");

        let (_, body) = call(app(state(false)), get("/api/fact-checks/feeds")).await;
        assert_eq!(body["used_fallback"], true);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }
}
