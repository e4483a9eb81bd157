//! News data structures shared by every source

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NewsCheckError;

/// Placeholder used when an upstream item has no title
pub const NO_TITLE: &str = "No title";

/// Placeholder used when an upstream item has no description
pub const NO_DESCRIPTION: &str = "No description";

/// Fixed set of browsable news categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Science,
        Category::Health,
    ];

    /// Identifier used by the headline API and in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }

    /// Arabic display label, matching the language of the content
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "عام",
            Category::Business => "أعمال",
            Category::Technology => "تكنولوجيا",
            Category::Entertainment => "ترفيه",
            Category::Sports => "رياضة",
            Category::Science => "علوم",
            Category::Health => "صحة",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NewsCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| NewsCheckError::validation(format!("Unknown category: {}", s)))
    }
}

/// A news article normalized from any upstream (headline API, RSS, Atom)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Headline, or [`NO_TITLE`] when the upstream omitted it
    pub title: String,
    /// Link to the full article
    pub link: String,
    /// Plain or HTML description; may be empty
    pub description: String,
    /// Publication time (fetch time when the upstream value was unusable)
    pub published_at: DateTime<Utc>,
    /// Display name of the publisher or feed
    pub source_name: String,
    /// Thumbnail/image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Category the article was requested under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source_name: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: String::new(),
            published_at,
            source_name: source_name.into(),
            image_url: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}
