//! Persistent seen-URL state.
//!
//! The state file is a small JSON document:
//!
//! ```json
//! {
//!   "updated_at": "2025-05-06T14:30:00+00:00",
//!   "seen_urls": ["https://example.com/a", "https://example.com/b"]
//! }
//! ```
//!
//! It is loaded once at startup, extended with newly alerted urls, and
//! rewritten as a whole — only after the digest email has gone out. The set
//! grows monotonically; there is no eviction, and the file can be deleted to
//! reset deduplication. A single invocation owns the file; overlapping runs
//! are not guarded against and the scheduler must not overlap them.

use crate::error::{Error, Result};
use crate::models::Article;
use chrono::Utc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// On-disk shape of the state file.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    updated_at: String,
    seen_urls: Vec<String>,
}

/// Article URLs that have already been alerted on.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: HashSet<String>,
}

impl SeenSet {
    /// Load the seen set from `path`.
    ///
    /// A missing file is not an error — the first run starts with an empty
    /// set. A file that exists but does not parse as the expected shape
    /// fails with [`Error::StateCorrupt`].
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("State file absent; starting with an empty seen set");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let parsed: StateFile = serde_json::from_str(&raw)
            .map_err(|e| Error::StateCorrupt(format!("{}: {e}", path.display())))?;

        Ok(Self {
            urls: parsed.seen_urls.into_iter().collect(),
        })
    }

    /// Overwrite `path` with the current set, sorted, stamped with the
    /// current UTC time.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let payload = StateFile {
            updated_at: Utc::now().to_rfc3339(),
            seen_urls: self.urls.iter().cloned().sorted().collect(),
        };

        fs::write(path, serde_json::to_string_pretty(&payload)?)?;
        info!(count = self.urls.len(), "Persisted seen-URL state");
        Ok(())
    }

    /// Articles from `fetched` that carry a usable url and have not been
    /// alerted on before.
    ///
    /// Input order is preserved. Within the batch, only the first article
    /// for a given url survives, so a url can never appear in one digest
    /// twice.
    pub fn filter_new(&self, fetched: Vec<Article>) -> Vec<Article> {
        fetched
            .into_iter()
            .filter(|article| article.key().is_some())
            .unique_by(|article| article.url.clone())
            .filter(|article| {
                article
                    .key()
                    .map_or(false, |url| !self.urls.contains(url))
            })
            .collect()
    }

    /// Record `urls` as seen.
    pub fn extend<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.urls.extend(urls);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn article(url: Option<&str>, title: Option<&str>) -> Article {
        Article {
            title: title.map(str::to_string),
            source: None,
            url: url.map(str::to_string),
            published_at: None,
        }
    }

    fn seen_with(urls: &[&str]) -> SeenSet {
        let mut seen = SeenSet::default();
        seen.extend(urls.iter().map(|u| u.to_string()));
        seen
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let seen = SeenSet::load(&dir.path().join("absent.json")).unwrap();
        assert!(seen.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");

        let mut seen = SeenSet::default();
        seen.extend([
            "https://example.com/b".to_string(),
            "https://example.com/a".to_string(),
        ]);
        seen.save(&path).unwrap();

        let reloaded = SeenSet::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://example.com/a"));
        assert!(reloaded.contains("https://example.com/b"));
    }

    #[test]
    fn test_saved_file_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");

        seen_with(&["https://example.com/b", "https://example.com/a"])
            .save(&path)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let urls: Vec<&str> = value["seen_urls"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
        assert!(!value["updated_at"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, "not json at all {").unwrap();

        match SeenSet::load(&path) {
            Err(Error::StateCorrupt(msg)) => assert!(msg.contains("seen.json")),
            other => panic!("expected StateCorrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_load_wrong_shape_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, r#"{"seen_urls": "not-a-list"}"#).unwrap();

        assert!(matches!(
            SeenSet::load(&path),
            Err(Error::StateCorrupt(_))
        ));
    }

    #[test]
    fn test_filter_new_drops_seen_and_preserves_order() {
        let seen = seen_with(&["http://a"]);
        let fetched = vec![
            article(Some("http://a"), None),
            article(Some("http://b"), Some("B")),
            article(Some("http://c"), Some("C")),
        ];

        let new_articles = seen.filter_new(fetched);
        let urls: Vec<_> = new_articles.iter().filter_map(|a| a.key()).collect();
        assert_eq!(urls, vec!["http://b", "http://c"]);
        assert_eq!(new_articles[0].title.as_deref(), Some("B"));
    }

    #[test]
    fn test_filter_new_discards_urlless_articles() {
        let seen = SeenSet::default();
        let fetched = vec![
            article(None, Some("no url")),
            article(Some(""), Some("empty url")),
            article(Some("http://a"), Some("A")),
        ];

        let new_articles = seen.filter_new(fetched);
        assert_eq!(new_articles.len(), 1);
        assert_eq!(new_articles[0].key(), Some("http://a"));
    }

    #[test]
    fn test_filter_new_collapses_batch_duplicates() {
        let seen = SeenSet::default();
        let fetched = vec![
            article(Some("http://a"), Some("first")),
            article(Some("http://a"), Some("second")),
        ];

        let new_articles = seen.filter_new(fetched);
        assert_eq!(new_articles.len(), 1);
        assert_eq!(new_articles[0].title.as_deref(), Some("first"));
    }

    #[test]
    fn test_full_run_scenario() {
        // seen = {a}; fetched = [a, b] -> new = [b]; persisted = {a, b}
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");

        let mut seen = seen_with(&["http://a"]);
        let fetched = vec![
            article(Some("http://a"), None),
            article(Some("http://b"), Some("B")),
        ];

        let new_articles = seen.filter_new(fetched);
        assert_eq!(new_articles.len(), 1);
        assert_eq!(new_articles[0].key(), Some("http://b"));

        seen.extend(new_articles.iter().filter_map(|a| a.key().map(str::to_string)));
        seen.save(&path).unwrap();

        let reloaded = SeenSet::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("http://a"));
        assert!(reloaded.contains("http://b"));
    }
}
