//! News headlines API client.
//!
//! One GET against the fixed top-headlines endpoint per run — no retries,
//! no pagination. The body is read as text and parsed with `serde_json`, so
//! a failing response can be quoted (truncated) in the error message even
//! when it is not the shape we expect. A run that fails here exits non-zero
//! and the next scheduled invocation simply tries again.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::models::{Article, HeadlinesResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Fixed top-headlines endpoint.
const NEWS_API_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";

/// Upper bound on the whole HTTP exchange.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("news_alert/", env!("CARGO_PKG_VERSION"));

/// Fetch the current top headlines.
///
/// Builds the query from the configuration — country, API key, page size
/// (the per-email item cap), and category when set — issues a single GET,
/// and returns the response's `articles` array. A response whose `status`
/// field is not `"ok"` fails with [`Error::Api`] carrying the error payload.
///
/// The API key travels only in the query string; it is never logged.
#[instrument(level = "info", skip_all, fields(country = %cfg.news_country))]
pub async fn fetch_headlines(cfg: &Cli) -> Result<Vec<Article>> {
    let mut params = vec![
        ("country", cfg.news_country.clone()),
        ("apiKey", cfg.news_api_key.clone()),
        ("pageSize", cfg.max_items_per_email.to_string()),
    ];
    if let Some(category) = &cfg.news_category {
        params.push(("category", category.clone()));
    }
    let url = Url::parse_with_params(NEWS_API_ENDPOINT, &params)?;

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    debug!(
        endpoint = NEWS_API_ENDPOINT,
        category = ?cfg.news_category,
        page_size = cfg.max_items_per_email,
        "Requesting top headlines"
    );
    let body = client.get(url).send().await?.text().await?;

    let articles = parse_headlines(&body)?;
    info!(count = articles.len(), "Fetched headlines");
    Ok(articles)
}

/// Parse a headlines API body and check its embedded `status` field.
fn parse_headlines(body: &str) -> Result<Vec<Article>> {
    let response: HeadlinesResponse = serde_json::from_str(body)
        .map_err(|e| Error::Api(format!("{e}; body: {}", truncate_for_log(body, 300))))?;

    if response.status != "ok" {
        let code = response.code.as_deref().unwrap_or("unknown");
        let message = response.message.as_deref().unwrap_or("no message");
        return Err(Error::Api(format!(
            "status {:?} (code {code}): {message}; body: {}",
            response.status,
            truncate_for_log(body, 300)
        )));
    }

    Ok(response.articles)
}

/// Truncate an API payload for inclusion in errors and logs.
fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}
