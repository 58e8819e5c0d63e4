//! Page metadata scrapers: publication date, author, title.
//!
//! Each field resolves independently through a cascade of pattern scrapers,
//! highest-trust source first:
//!
//! - **title**: `og:title`, `twitter:title`, then the `<title>` tag
//! - **author**: author meta tags, JSON-LD `author`, then a `rel=author` link
//! - **date**: published-time meta tags, JSON-LD `datePublished`, then the
//!   first `<time datetime>` attribute
//!
//! Dates that parse are normalized to RFC 3339 so the downstream processor
//! sees one format; values that don't parse are passed through as found,
//! since a raw date string still beats no date at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

/// Metadata fields resolved from a fetched document. Each field is
/// independently optional; rendering substitutes the sentinel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Publication date, RFC 3339 when the source value parsed.
    pub date: Option<String>,
    /// Author display name.
    pub author: Option<String>,
    /// Page or article title.
    pub title: Option<String>,
}

static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta[content]").unwrap());
static TITLE_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static TIME_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("time[datetime]").unwrap());
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static AUTHOR_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("[rel=author]").unwrap());

/// Leading "by"-style credit prefix on author strings.
static BY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*by[\s:]+").unwrap());

/// Resolve all three metadata fields from a document.
pub fn extract(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    PageMetadata {
        date: extract_date(&document),
        author: extract_author(&document),
        title: extract_title(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    meta_content(document, "og:title")
        .or_else(|| meta_content(document, "twitter:title"))
        .or_else(|| {
            document
                .select(&TITLE_TAG)
                .next()
                .map(|t| t.text().collect::<String>())
        })
        .and_then(non_empty)
}

fn extract_author(document: &Html) -> Option<String> {
    meta_content(document, "author")
        .or_else(|| meta_content(document, "article:author"))
        .or_else(|| json_ld_string(document, "author"))
        .or_else(|| {
            document
                .select(&AUTHOR_LINK)
                .next()
                .map(|a| a.text().collect::<String>())
        })
        .and_then(clean_author)
}

fn extract_date(document: &Html) -> Option<String> {
    meta_content(document, "article:published_time")
        .or_else(|| meta_content(document, "datePublished"))
        .or_else(|| meta_content(document, "date"))
        .or_else(|| json_ld_string(document, "datePublished"))
        .or_else(|| {
            document
                .select(&TIME_TAG)
                .next()
                .and_then(|t| t.value().attr("datetime"))
                .map(str::to_string)
        })
        .and_then(non_empty)
        .map(|raw| normalize_date(&raw))
}

/// First `<meta>` whose `property`, `name`, or `itemprop` matches `key`.
fn meta_content(document: &Html, key: &str) -> Option<String> {
    for element in document.select(&META) {
        let tag = element.value();
        let matched = ["property", "name", "itemprop"]
            .into_iter()
            .filter_map(|attr| tag.attr(attr))
            .any(|value| value.eq_ignore_ascii_case(key));
        if matched {
            if let Some(content) = tag.attr("content").and_then(|c| non_empty(c.to_string())) {
                return Some(content);
            }
        }
    }
    None
}

/// First string at `key` across the document's JSON-LD blocks.
///
/// Tolerates the shapes publishers actually emit: a bare string, an object
/// with a `name`, an array of either, and blocks wrapped in `@graph`.
fn json_ld_string(document: &Html, key: &str) -> Option<String> {
    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        if let Ok(value) = serde_json::from_str::<Value>(&raw) {
            if let Some(found) = find_string(&value, key) {
                return Some(found);
            }
        }
    }
    None
}

fn find_string(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(|item| find_string(item, key)),
        Value::Object(map) => match map.get(key) {
            Some(Value::String(s)) => non_empty(s.clone()),
            Some(Value::Object(inner)) => inner
                .get("name")
                .and_then(Value::as_str)
                .and_then(|s| non_empty(s.to_string())),
            Some(Value::Array(items)) => items.iter().find_map(|item| match item {
                Value::String(s) => non_empty(s.clone()),
                Value::Object(inner) => inner
                    .get("name")
                    .and_then(Value::as_str)
                    .and_then(|s| non_empty(s.to_string())),
                _ => None,
            }),
            _ => map.get("@graph").and_then(|graph| find_string(graph, key)),
        },
        _ => None,
    }
}

/// Normalize a raw date string to RFC 3339 where possible.
fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.to_rfc3339();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.and_utc().to_rfc3339();
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc).to_rfc3339();
            }
        }
    }
    raw.to_string()
}

/// Trim a candidate author down to a display name.
///
/// Rejects URL values (`article:author` frequently carries a profile link)
/// and strips the leading "By" credit publishers prepend.
fn clean_author(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if url::Url::parse(trimmed).is_ok() {
        return None;
    }
    let stripped = BY_PREFIX.replace(trimmed, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    non_empty(collapsed)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_title_wins_over_the_title_tag() {
        let html = r#"<head><meta property="og:title" content="OG Title"><title>Tag Title</title></head>"#;
        assert_eq!(extract(html).title, Some("OG Title".to_string()));
    }

    #[test]
    fn title_tag_is_the_fallback() {
        let html = "<head><title>Tag Title</title></head>";
        assert_eq!(extract(html).title, Some("Tag Title".to_string()));
    }

    #[test]
    fn author_meta_is_cleaned_of_the_by_prefix() {
        let html = r#"<head><meta name="author" content="By  Jane   Doe"></head>"#;
        assert_eq!(extract(html).author, Some("Jane Doe".to_string()));
    }

    #[test]
    fn author_profile_urls_are_rejected() {
        let html = r#"<head><meta property="article:author" content="https://example.com/jane"></head>"#;
        assert_eq!(extract(html).author, None);
    }

    #[test]
    fn author_resolves_from_json_ld_person() {
        let html = r#"<script type="application/ld+json">
            {"@type": "NewsArticle", "author": {"@type": "Person", "name": "Jane Doe"}}
        </script>"#;
        assert_eq!(extract(html).author, Some("Jane Doe".to_string()));
    }

    #[test]
    fn author_resolves_from_rel_author_link() {
        let html = r#"<body><a rel="author" href="/staff/jane">Jane Doe</a></body>"#;
        assert_eq!(extract(html).author, Some("Jane Doe".to_string()));
    }

    #[test]
    fn published_time_meta_is_normalized_to_rfc3339() {
        let html =
            r#"<head><meta property="article:published_time" content="2020-06-01T12:30:00Z"></head>"#;
        assert_eq!(
            extract(html).date,
            Some("2020-06-01T12:30:00+00:00".to_string())
        );
    }

    #[test]
    fn bare_dates_become_utc_midnight() {
        let html = r#"<head><meta name="date" content="2020-06-01"></head>"#;
        assert_eq!(
            extract(html).date,
            Some("2020-06-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn date_resolves_from_json_ld_graph() {
        let html = r#"<script type="application/ld+json">
            {"@graph": [{"@type": "WebPage"}, {"@type": "NewsArticle", "datePublished": "2021-03-04T08:00:00+02:00"}]}
        </script>"#;
        assert_eq!(
            extract(html).date,
            Some("2021-03-04T08:00:00+02:00".to_string())
        );
    }

    #[test]
    fn time_tag_datetime_is_the_last_resort() {
        let html = r#"<body><time datetime="2019-12-31">New Year's Eve</time></body>"#;
        assert_eq!(
            extract(html).date,
            Some("2019-12-31T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn unparseable_dates_pass_through_raw() {
        let html = r#"<head><meta name="date" content="last Tuesday"></head>"#;
        assert_eq!(extract(html).date, Some("last Tuesday".to_string()));
    }

    #[test]
    fn empty_document_resolves_nothing() {
        assert_eq!(extract("<html></html>"), PageMetadata::default());
    }
}
