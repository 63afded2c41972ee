//! Data models for the news headlines API.
//!
//! These structs mirror the wire schema of the top-headlines endpoint:
//! a `status` field, optional error `code`/`message`, and an `articles`
//! array of objects with `title`, `source.name`, `url`, and `publishedAt`.
//! The API omits fields freely, so everything on an [`Article`] is optional
//! and deserialization is lenient — a partial record is still a record.
//!
//! An article's identity is its URL. Records without one cannot be
//! deduplicated across runs and are discarded before the diff.

use serde::{Deserialize, Serialize};

/// Top-level response envelope from the headlines endpoint.
///
/// On success `status` is `"ok"` and `articles` is populated. On failure
/// `status` is `"error"` and `code`/`message` describe the problem.
#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Absent on error responses; treated as an empty list.
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A single headline record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    /// Identity key. Articles without a url never enter the seen set.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

/// The `source` object nested inside an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// The deduplication key: the article url, with empty strings counting
    /// as missing.
    pub fn key(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Title for display, falling back to `(no title)`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("(no title)")
    }

    /// Source name for display, falling back to `Unknown source`.
    pub fn display_source(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown source")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_article_deserialization() {
        let json = r#"{
            "source": {"id": "reuters", "name": "Reuters"},
            "author": "Jane Doe",
            "title": "Markets rally",
            "url": "https://example.com/markets-rally",
            "publishedAt": "2025-05-06T14:30:00Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.display_title(), "Markets rally");
        assert_eq!(article.display_source(), "Reuters");
        assert_eq!(article.key(), Some("https://example.com/markets-rally"));
        assert_eq!(article.published_at.as_deref(), Some("2025-05-06T14:30:00Z"));
    }

    #[test]
    fn test_partial_article_deserialization() {
        let article: Article = serde_json::from_str("{}").unwrap();
        assert_eq!(article.key(), None);
        assert_eq!(article.display_title(), "(no title)");
        assert_eq!(article.display_source(), "Unknown source");
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let json = r#"{"title": "", "url": "", "source": {"name": ""}}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.key(), None);
        assert_eq!(article.display_title(), "(no title)");
        assert_eq!(article.display_source(), "Unknown source");
    }

    #[test]
    fn test_null_source_name() {
        let json = r#"{"title": "T", "source": {"id": null, "name": null}}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.display_source(), "Unknown source");
    }

    #[test]
    fn test_ok_response_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "A", "url": "https://example.com/a"},
                {"title": "B", "url": "https://example.com/b"}
            ]
        }"#;

        let response: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "ok");
        assert_eq!(response.articles.len(), 2);
        assert_eq!(response.articles[0].key(), Some("https://example.com/a"));
    }

    #[test]
    fn test_error_response_without_articles() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Bad key."}"#;

        let response: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "error");
        assert_eq!(response.code.as_deref(), Some("apiKeyInvalid"));
        assert!(response.articles.is_empty());
    }
}
