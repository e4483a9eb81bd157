//! Static fallback content substituted for unavailable upstreams
//!
//! The catalog is built once and shared read-only by every request. Entries
//! store an age rather than a timestamp so that fallback articles always look
//! as fresh relative to the request as they did when the table was written.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use newscheck_core::{Article, Category};
use newscheck_sources::rss_client::{BBC_ARABIC, FACTCHECK_ORG, GOOGLE_NEWS, SNOPES};

/// One fallback article, dated relative to the request
#[derive(Debug, Clone)]
pub struct FallbackEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub source_name: String,
    pub image_url: Option<String>,
    pub age: Duration,
}

impl FallbackEntry {
    pub fn new(
        title: &str,
        link: &str,
        description: &str,
        source_name: &str,
        image_url: Option<&str>,
        age_hours: i64,
    ) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
            source_name: source_name.to_string(),
            image_url: image_url.map(str::to_string),
            age: Duration::hours(age_hours),
        }
    }

    fn materialize(&self, now: DateTime<Utc>, category: Option<Category>) -> Article {
        let mut article = Article::new(&self.title, &self.link, &self.source_name, now - self.age)
            .with_description(&self.description);
        if let Some(image) = &self.image_url {
            article = article.with_image(image);
        }
        article.category = category;
        article
    }
}

/// Immutable fallback tables, one per category and one per named feed
#[derive(Debug, Clone, Default)]
pub struct FallbackCatalog {
    categories: BTreeMap<Category, Vec<FallbackEntry>>,
    feeds: HashMap<String, Vec<FallbackEntry>>,
}

impl FallbackCatalog {
    pub fn new(
        categories: BTreeMap<Category, Vec<FallbackEntry>>,
        feeds: HashMap<String, Vec<FallbackEntry>>,
    ) -> Self {
        Self { categories, feeds }
    }

    /// No fallback content at all; every unavailable branch stays empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fallback articles for `category`, dated against `now`
    pub fn category_articles(&self, category: Category, now: DateTime<Utc>) -> Vec<Article> {
        self.categories
            .get(&category)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| e.materialize(now, Some(category)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every category's fallback articles, in category order
    pub fn all_articles(&self, now: DateTime<Utc>) -> Vec<Article> {
        Category::ALL
            .into_iter()
            .flat_map(|c| self.category_articles(c, now))
            .collect()
    }

    /// Fallback items for the feed called `feed_name`
    pub fn feed_articles(&self, feed_name: &str, now: DateTime<Utc>) -> Vec<Article> {
        self.feeds
            .get(feed_name)
            .map(|entries| entries.iter().map(|e| e.materialize(now, None)).collect())
            .unwrap_or_default()
    }

    /// Built-in tables: two articles per category and one or two items per feed
    pub fn builtin() -> Self {
        let categories = BTreeMap::from([
            (
                Category::General,
                vec![
                    FallbackEntry::new(
                        "UN calls for a ceasefire in the Middle East",
                        "https://www.bbc.com/arabic",
                        "The United Nations called for an immediate ceasefire in the Middle East amid rising tensions.",
                        "BBC News",
                        Some("https://ichef.bbci.co.uk/news/1024/branded_arabic/13B2/production/_132899876_mediaitem132899875.jpg"),
                        0,
                    ),
                    FallbackEntry::new(
                        "G20 summit convenes to discuss global economic challenges",
                        "https://www.aljazeera.net",
                        "The G20 summit opened to discuss global economic challenges and ways to cooperate.",
                        "Al Jazeera",
                        Some("https://picsum.photos/800/400?random=10"),
                        24,
                    ),
                ],
            ),
            (
                Category::Business,
                vec![
                    FallbackEntry::new(
                        "Oil prices climb as Middle East tensions rise",
                        "https://www.bloomberg.com/markets/commodities",
                        "Global oil prices rose 3% on fears that supply could be disrupted by tensions in the Middle East.",
                        "Bloomberg",
                        Some("https://picsum.photos/800/400?random=20"),
                        48,
                    ),
                    FallbackEntry::new(
                        "Central bank cuts interest rates by 25 basis points",
                        "https://www.cnbc.com/world/?region=world",
                        "The central bank cut interest rates by 25 basis points in an effort to stimulate growth.",
                        "CNBC",
                        Some("https://picsum.photos/800/400?random=21"),
                        72,
                    ),
                ],
            ),
            (
                Category::Technology,
                vec![
                    FallbackEntry::new(
                        "New generation of smartphones launches with AI features",
                        "https://www.wired.com/category/gear/phones/",
                        "Major technology companies announced a new generation of smartphones with advanced AI features.",
                        "Wired",
                        Some("https://picsum.photos/800/400?random=30"),
                        96,
                    ),
                    FallbackEntry::new(
                        "New technology charges electric cars in minutes",
                        "https://techcrunch.com/category/transportation/",
                        "Researchers developed a technique that charges electric car batteries in minutes instead of hours.",
                        "TechCrunch",
                        Some("https://picsum.photos/800/400?random=31"),
                        120,
                    ),
                ],
            ),
            (
                Category::Entertainment,
                vec![
                    FallbackEntry::new(
                        "Release date announced for the new season of \"House of the Dragon\"",
                        "https://variety.com/tv/",
                        "HBO announced the release date of the eagerly awaited second season of \"House of the Dragon\".",
                        "Variety",
                        Some("https://picsum.photos/800/400?random=40"),
                        144,
                    ),
                    FallbackEntry::new(
                        "Arab film wins top prize at the Cannes Film Festival",
                        "https://www.hollywoodreporter.com/movies/",
                        "An Arab film won the grand prize at Cannes, a historic achievement for Arab cinema.",
                        "Hollywood Reporter",
                        Some("https://picsum.photos/800/400?random=41"),
                        168,
                    ),
                ],
            ),
            (
                Category::Sports,
                vec![
                    FallbackEntry::new(
                        "Egypt qualifies for the World Cup finals",
                        "https://www.espn.com/soccer/",
                        "Egypt's national team qualified for the World Cup finals after winning the playoff.",
                        "ESPN",
                        Some("https://picsum.photos/800/400?random=50"),
                        192,
                    ),
                    FallbackEntry::new(
                        "Real Madrid win the Champions League for the 15th time",
                        "https://www.beinsports.com/ar/",
                        "Real Madrid were crowned European champions for the 15th time after winning the final.",
                        "beIN SPORTS",
                        Some("https://picsum.photos/800/400?random=51"),
                        216,
                    ),
                ],
            ),
            (
                Category::Science,
                vec![
                    FallbackEntry::new(
                        "New archaeological find in Egypt dates to the pharaohs",
                        "https://www.nationalgeographic.com/history/",
                        "Archaeologists announced a new pharaonic tomb holding rare treasures dating back 3,000 years.",
                        "National Geographic",
                        Some("https://picsum.photos/800/400?random=60"),
                        240,
                    ),
                    FallbackEntry::new(
                        "Astronomers find a potentially habitable exoplanet",
                        "https://www.sciencedaily.com/",
                        "Astronomers discovered a planet outside the solar system in the habitable zone of its star.",
                        "Science Daily",
                        Some("https://picsum.photos/800/400?random=61"),
                        264,
                    ),
                ],
            ),
            (
                Category::Health,
                vec![
                    FallbackEntry::new(
                        "WHO warns of a new influenza strain",
                        "https://www.who.int/",
                        "The World Health Organization warned that a new influenza strain could cause a wave of infections this winter.",
                        "WHO",
                        Some("https://picsum.photos/800/400?random=70"),
                        288,
                    ),
                    FallbackEntry::new(
                        "Study links good sleep to heart health",
                        "https://www.medicalnewstoday.com/",
                        "A recent study found a close link between sleep quality and cardiovascular health.",
                        "Medical News Today",
                        Some("https://picsum.photos/800/400?random=71"),
                        312,
                    ),
                ],
            ),
        ]);

        let feeds = HashMap::from([
            (
                BBC_ARABIC.to_string(),
                vec![
                    FallbackEntry::new(
                        "UN warns of a worsening humanitarian crisis in Gaza",
                        "https://www.bbc.com/arabic",
                        "The United Nations warned that the humanitarian situation in Gaza is deteriorating as the conflict continues.",
                        BBC_ARABIC,
                        Some("https://ichef.bbci.co.uk/news/800/cpsprodpb/13B2/production/_132899876_mediaitem132899875.jpg"),
                        0,
                    ),
                    FallbackEntry::new(
                        "Global oil prices rise with Middle East tensions",
                        "https://www.bbc.com/arabic",
                        "Oil prices rose noticeably on world markets amid fears over supplies.",
                        BBC_ARABIC,
                        Some("https://ichef.bbci.co.uk/news/800/cpsprodpb/11D88/production/_132896543_gettyimages-1258163435.jpg"),
                        24,
                    ),
                ],
            ),
            (
                GOOGLE_NEWS.to_string(),
                vec![
                    FallbackEntry::new(
                        "New initiative to support technology startups",
                        "https://news.google.com",
                        "The communications ministry launched a $100 million initiative to support technology startups.",
                        GOOGLE_NEWS,
                        Some("https://picsum.photos/800/400?random=1"),
                        0,
                    ),
                    FallbackEntry::new(
                        "International book fair opens with more than 500 publishers",
                        "https://news.google.com",
                        "The international book fair opened with more than 500 publishers and runs for two weeks.",
                        GOOGLE_NEWS,
                        Some("https://picsum.photos/800/400?random=2"),
                        48,
                    ),
                ],
            ),
            (
                SNOPES.to_string(),
                vec![FallbackEntry::new(
                    "Fact check: does eating garlic prevent coronavirus infection?",
                    "https://www.snopes.com",
                    "Social media posts claim that eating garlic protects against coronavirus. We checked.",
                    SNOPES,
                    Some("https://picsum.photos/800/400?random=3"),
                    72,
                )],
            ),
            (
                FACTCHECK_ORG.to_string(),
                vec![FallbackEntry::new(
                    "Analysis: claims about vaccines and fertility lack scientific support",
                    "https://www.factcheck.org",
                    "We analysed claims about COVID-19 vaccines and fertility and found no reliable scientific evidence for them.",
                    FACTCHECK_ORG,
                    Some("https://picsum.photos/800/400?random=4"),
                    96,
                )],
            ),
        ]);

        Self::new(categories, feeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_category() {
        let catalog = FallbackCatalog::builtin();
        let now = Utc::now();
        for category in Category::ALL {
            let articles = catalog.category_articles(category, now);
            assert_eq!(articles.len(), 2, "{category}");
            assert!(articles.iter().all(|a| a.category == Some(category)));
        }
        assert_eq!(catalog.all_articles(now).len(), 14);
    }

    #[test]
    fn test_ages_are_relative_to_request_time() {
        let catalog = FallbackCatalog::builtin();
        let now = Utc::now();
        let articles = catalog.category_articles(Category::General, now);
        assert_eq!(articles[0].published_at, now);
        assert_eq!(articles[1].published_at, now - Duration::hours(24));
    }

    #[test]
    fn test_feed_tables() {
        let catalog = FallbackCatalog::builtin();
        let now = Utc::now();
        assert_eq!(catalog.feed_articles(SNOPES, now).len(), 1);
        assert_eq!(catalog.feed_articles(BBC_ARABIC, now)[0].source_name, BBC_ARABIC);
        assert!(catalog.feed_articles("Unknown Feed", now).is_empty());
        assert!(FallbackCatalog::empty().all_articles(now).is_empty());
    }
}
