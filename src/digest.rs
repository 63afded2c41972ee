//! Plain-text digest rendering.
//!
//! Pure string assembly, no side effects. The digest is a header line
//! followed by one numbered block per article, in the order the API
//! returned them (typically recency):
//!
//! ```text
//! New headlines detected:
//!
//! 1. Markets rally
//!    Source: Reuters
//!    Published: 2025-05-06T14:30:00Z
//!    URL: https://example.com/markets-rally
//! ```
//!
//! The `Published` and `URL` lines are omitted when the article does not
//! carry them.

use crate::models::Article;

/// Subject line for a digest covering `count` new headlines.
pub fn subject(count: usize) -> String {
    format!("News alert: {count} new headline(s)")
}

/// Render the digest body for `articles`.
pub fn format_digest(articles: &[Article]) -> String {
    let mut lines = vec!["New headlines detected:".to_string(), String::new()];

    for (i, article) in articles.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, article.display_title()));
        lines.push(format!("   Source: {}", article.display_source()));
        if let Some(published_at) = article.published_at.as_deref().filter(|p| !p.is_empty()) {
            lines.push(format!("   Published: {published_at}"));
        }
        if let Some(url) = article.key() {
            lines.push(format!("   URL: {url}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
