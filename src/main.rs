//! # News Alert
//!
//! Polls a news headlines API, diffs the results against a persisted set of
//! already-alerted article URLs, and emails a plain-text digest of anything
//! new. Designed to run unattended from cron or a systemd timer; one
//! invocation is one poll.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... SMTP_HOST=smtp.example.com SMTP_USER=bot@example.com \
//!   SMTP_PASSWORD=... TO_EMAIL=you@example.com news_alert
//! ```
//!
//! ## Pipeline
//!
//! The run is strictly linear:
//! 1. **Load state**: read the seen-URL set from the JSON state file
//! 2. **Fetch**: one GET against the top-headlines endpoint
//! 3. **Diff**: keep articles whose url is not in the seen set
//! 4. **Format**: render the plain-text digest
//! 5. **Send**: one SMTP STARTTLS delivery to one recipient
//! 6. **Persist**: rewrite the state file with the new urls
//!
//! A run with no new headlines stops after step 3 and exits 0 without
//! touching the state file. Any error aborts the run with a non-zero exit;
//! because the state file is only written after a successful send, a failed
//! run re-alerts the same batch next time instead of dropping it.

use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod digest;
mod error;
mod mailer;
mod models;
mod state;

use cli::Cli;
use mailer::Mailer;
use state::SeenSet;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), error::Error> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_alert starting up");

    let cfg = Cli::parse();
    debug!(
        country = %cfg.news_country,
        category = ?cfg.news_category,
        state_file = %cfg.state_file.display(),
        max_items = cfg.max_items_per_email,
        "Parsed configuration"
    );

    let mut seen = SeenSet::load(&cfg.state_file)?;
    info!(
        known_urls = seen.len(),
        state_file = %cfg.state_file.display(),
        "Loaded seen-URL state"
    );

    let headlines = api::fetch_headlines(&cfg).await?;

    let new_articles = seen.filter_new(headlines);
    if new_articles.is_empty() {
        info!("No new headlines found");
        return Ok(());
    }
    info!(count = new_articles.len(), "New headlines detected");

    let subject = digest::subject(new_articles.len());
    let body = digest::format_digest(&new_articles);

    if cfg.dry_run {
        info!(%subject, "Dry run; printing digest instead of sending");
        println!("{body}");
        return Ok(());
    }

    let mailer = Mailer::from_cli(&cfg)?;
    mailer.send(&subject, &body).await?;

    // Persisted only after the send succeeded. A failed send must leave the
    // file byte-identical so the next invocation retries the same batch.
    seen.extend(
        new_articles
            .iter()
            .filter_map(|article| article.key().map(str::to_string)),
    );
    seen.save(&cfg.state_file)?;
    info!(
        count = new_articles.len(),
        total_seen = seen.len(),
        "Sent alert for new headlines"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
