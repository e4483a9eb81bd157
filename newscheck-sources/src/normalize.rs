//! Source normalizer: headline-API articles, RSS items and Atom entries into [`Article`]

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use newscheck_core::{Article, Category, NO_DESCRIPTION, NO_TITLE};

use crate::types::NewsApiArticle;

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]+src=["']([^"'>]+)["']"#).expect("valid img regex"));

/// Convert a NewsAPI article, tagging it with the category it was requested under
pub fn from_news_api(
    article: NewsApiArticle,
    category: Option<Category>,
    fetched_at: DateTime<Utc>,
) -> Article {
    let published_at = article
        .published_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(fetched_at);

    Article {
        title: text_or(article.title.as_deref(), NO_TITLE),
        link: article.url.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| "#".to_string()),
        description: article
            .description
            .as_deref()
            .map(strip_html)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        published_at,
        source_name: article
            .source
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        image_url: article.url_to_image.filter(|u| !u.trim().is_empty()),
        category,
    }
}

/// Convert an RSS item published by `source_name`
pub fn from_rss_item(item: &rss::Item, source_name: &str, fetched_at: DateTime<Utc>) -> Article {
    let description_html = item.description().unwrap_or_default();

    let published_at = item
        .pub_date()
        .and_then(parse_timestamp)
        .unwrap_or(fetched_at);

    Article {
        title: text_or(item.title(), NO_TITLE),
        link: text_or(item.link(), "#"),
        description: text_or(Some(&strip_html(description_html)), NO_DESCRIPTION),
        published_at,
        source_name: source_name.to_string(),
        image_url: rss_image(item),
        category: None,
    }
}

/// Convert an Atom entry published by `source_name`
pub fn from_atom_entry(
    entry: &atom_syndication::Entry,
    source_name: &str,
    fetched_at: DateTime<Utc>,
) -> Article {
    let summary_html = entry.summary().map(|s| s.as_str()).unwrap_or_default();
    let content_html = entry.content().and_then(|c| c.value()).unwrap_or_default();

    let description = if !summary_html.is_empty() {
        strip_html(summary_html)
    } else {
        strip_html(content_html)
    };

    let published_at = entry
        .published()
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|| entry.updated().with_timezone(&Utc));
    // Atom requires <updated>, but the parser defaults it to the epoch when absent
    let published_at = if published_at.timestamp() == 0 {
        fetched_at
    } else {
        published_at
    };

    Article {
        title: text_or(Some(&entry.title().to_string()), NO_TITLE),
        link: entry
            .links()
            .first()
            .map(|l| l.href().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "#".to_string()),
        description: text_or(Some(&description), NO_DESCRIPTION),
        published_at,
        source_name: source_name.to_string(),
        image_url: extract_image_from_html(content_html)
            .or_else(|| extract_image_from_html(summary_html)),
        category: None,
    }
}

/// Image for an RSS item, in order of precedence:
/// media:content `url`, an `image/*` enclosure, the first `<img>` in the description.
pub fn rss_image(item: &rss::Item) -> Option<String> {
    media_content_url(item)
        .or_else(|| {
            item.enclosure()
                .filter(|e| e.mime_type().starts_with("image/"))
                .map(|e| e.url().to_string())
        })
        .or_else(|| item.description().and_then(extract_image_from_html))
}

fn media_content_url(item: &rss::Item) -> Option<String> {
    item.extensions()
        .get("media")?
        .get("content")?
        .iter()
        .find_map(|content| content.attrs().get("url").cloned())
        .filter(|url| !url.is_empty())
}

/// First `<img src="...">` in an HTML fragment
pub fn extract_image_from_html(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse RFC 2822 (RSS) or RFC 3339 (NewsAPI, Atom) timestamps
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

/// Strip HTML tags from text
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // Clean up whitespace and HTML entities
    result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewsApiSourceRef;

    fn fetched_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_strip_html() {
        let html = "<p>Hello <b>world</b>!</p>";
        assert_eq!(strip_html(html), "Hello world!");
        assert_eq!(strip_html("a &amp;lt; b"), "a &lt; b");
    }

    #[test]
    fn test_news_api_defaults() {
        let article = NewsApiArticle {
            source: NewsApiSourceRef { id: None, name: Some("Reuters".into()) },
            url: Some("https://reuters.com/a".into()),
            published_at: Some("not a date".into()),
            ..Default::default()
        };

        let normalized = from_news_api(article, Some(Category::Business), fetched_at());
        assert_eq!(normalized.title, NO_TITLE);
        assert_eq!(normalized.description, NO_DESCRIPTION);
        assert_eq!(normalized.published_at, fetched_at());
        assert_eq!(normalized.category, Some(Category::Business));
        assert_eq!(normalized.source_name, "Reuters");
    }

    #[test]
    fn test_news_api_parses_rfc3339() {
        let article = NewsApiArticle {
            title: Some("Markets rally".into()),
            published_at: Some("2024-06-01T08:30:00Z".into()),
            url_to_image: Some("https://img.example.com/1.jpg".into()),
            ..Default::default()
        };
        let normalized = from_news_api(article, None, fetched_at());
        assert_eq!(normalized.published_at.to_rfc3339(), "2024-06-01T08:30:00+00:00");
        assert_eq!(normalized.image_url.as_deref(), Some("https://img.example.com/1.jpg"));
        assert_eq!(normalized.link, "#");
    }

    fn parse_items(xml: &str) -> Vec<rss::Item> {
        rss::Channel::read_from(xml.as_bytes()).unwrap().items().to_vec()
    }

    #[test]
    fn test_rss_image_precedence() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
<channel><title>t</title><link>https://example.com</link><description>d</description>
<item>
  <title>All three</title>
  <link>https://example.com/1</link>
  <description><![CDATA[<img src="https://img/desc.jpg"> text]]></description>
  <enclosure url="https://img/enclosure.jpg" type="image/jpeg" length="1"/>
  <media:content url="https://img/media.jpg" medium="image"/>
</item>
<item>
  <title>Enclosure and description</title>
  <link>https://example.com/2</link>
  <description><![CDATA[<img src="https://img/desc.jpg"> text]]></description>
  <enclosure url="https://img/enclosure.jpg" type="image/jpeg" length="1"/>
</item>
<item>
  <title>Audio enclosure</title>
  <link>https://example.com/3</link>
  <description><![CDATA[<p><img src='https://img/desc.jpg'/></p>]]></description>
  <enclosure url="https://audio/ep.mp3" type="audio/mpeg" length="1"/>
</item>
<item>
  <title>Nothing</title>
  <link>https://example.com/4</link>
  <description>plain</description>
</item>
</channel></rss>"#;

        let images: Vec<_> = parse_items(xml).iter().map(rss_image).collect();
        assert_eq!(
            images,
            vec![
                Some("https://img/media.jpg".to_string()),
                Some("https://img/enclosure.jpg".to_string()),
                Some("https://img/desc.jpg".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_rss_item_placeholders() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>https://example.com</link><description>d</description>
<item><guid>only-a-guid</guid></item>
<item><title>Dated</title><link>https://example.com/d</link><pubDate>Tue, 10 Jun 2025 04:00:00 GMT</pubDate>
<description><![CDATA[<b>Bold</b> claim]]></description></item>
</channel></rss>"#;

        let items = parse_items(xml);
        let empty = from_rss_item(&items[0], "Snopes", fetched_at());
        assert_eq!(empty.title, NO_TITLE);
        assert_eq!(empty.description, NO_DESCRIPTION);
        assert_eq!(empty.link, "#");
        assert_eq!(empty.published_at, fetched_at());
        assert_eq!(empty.source_name, "Snopes");

        let dated = from_rss_item(&items[1], "Snopes", fetched_at());
        assert_eq!(dated.description, "Bold claim");
        assert_eq!(dated.published_at.to_rfc3339(), "2025-06-10T04:00:00+00:00");
    }
}
