//! Result shapes produced by the aggregation engine

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Article, Category};

/// Items that can be ordered newest-first
pub trait Timestamped {
    fn published_at(&self) -> DateTime<Utc>;
}

impl Timestamped for Article {
    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}

/// Sort newest-first and cap the list at `max` items.
///
/// `sort_by` is stable, so items with equal timestamps keep their arrival order.
pub fn sort_and_truncate<T: Timestamped>(items: &mut Vec<T>, max: usize) {
    items.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    items.truncate(max);
}

/// Merged output of one aggregation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult<T> {
    /// Newest first, never longer than the request's maximum
    pub items: Vec<T>,
    /// True when at least one branch was replaced by fallback content
    pub used_fallback: bool,
    /// Message for an inline error banner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AggregationResult<T> {
    pub fn live(items: Vec<T>) -> Self {
        Self {
            items,
            used_fallback: false,
            error: None,
        }
    }

    pub fn fallback(items: Vec<T>) -> Self {
        Self {
            items,
            used_fallback: true,
            error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for AggregationResult<T> {
    fn default() -> Self {
        Self::live(Vec::new())
    }
}

/// Per-category aggregation result.
///
/// Always holds an entry for every [`Category`], even when it is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedNews {
    categories: BTreeMap<Category, AggregationResult<Article>>,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategorizedNews {
    pub fn new() -> Self {
        Self {
            categories: Category::ALL
                .into_iter()
                .map(|c| (c, AggregationResult::default()))
                .collect(),
            used_fallback: false,
            error: None,
        }
    }

    /// Result for one category; a missing entry reads as empty
    pub fn get(&self, category: Category) -> &[Article] {
        self.categories
            .get(&category)
            .map_or(&[][..], |result| result.items.as_slice())
    }

    pub fn result(&self, category: Category) -> Option<&AggregationResult<Article>> {
        self.categories.get(&category)
    }

    pub fn categories(&self) -> &BTreeMap<Category, AggregationResult<Article>> {
        &self.categories
    }

    pub fn insert(&mut self, category: Category, result: AggregationResult<Article>) {
        self.used_fallback |= result.used_fallback;
        self.categories.insert(category, result);
    }
}

impl Default for CategorizedNews {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn article(title: &str, at: DateTime<Utc>) -> Article {
        Article::new(title, format!("https://example.com/{}", title), "Example", at)
    }

    #[test]
    fn test_sort_is_newest_first_and_stable() {
        let now = Utc::now();
        let mut items = vec![
            article("old", now - Duration::hours(5)),
            article("tie-a", now),
            article("mid", now - Duration::hours(1)),
            article("tie-b", now),
        ];

        sort_and_truncate(&mut items, 10);

        let titles: Vec<_> = items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["tie-a", "tie-b", "mid", "old"]);
    }

    #[test]
    fn test_truncate_caps_length() {
        let now = Utc::now();
        let mut items: Vec<_> = (0..8)
            .map(|i| article(&i.to_string(), now - Duration::minutes(i)))
            .collect();
        sort_and_truncate(&mut items, 5);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].title, "0");
    }

    #[test]
    fn test_categorized_news_has_every_category() {
        let news = CategorizedNews::new();
        assert_eq!(news.categories().len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(news.get(category).is_empty());
        }
    }

    #[test]
    fn test_insert_propagates_fallback_flag() {
        let mut news = CategorizedNews::new();
        news.insert(Category::Health, AggregationResult::fallback(vec![]));
        assert!(news.used_fallback);
        assert!(news.result(Category::Health).unwrap().used_fallback);
    }

    #[test]
    fn test_partial_mapping_reads_as_empty() {
        let json = r#"{"categories": {"health": {"items": [], "used_fallback": true}}, "used_fallback": true}"#;
        let news: CategorizedNews = serde_json::from_str(json).unwrap();
        assert!(news.get(Category::Sports).is_empty());
        assert!(news.result(Category::Sports).is_none());
        assert!(news.result(Category::Health).unwrap().used_fallback);
    }
}
