//! Command-line interface and configuration for news_alert.
//!
//! Every option is backed by an environment variable, matching the way the
//! binary is normally driven from cron. The parsed [`Cli`] struct is the
//! single configuration object for the run: it is built once at startup and
//! passed by reference to each component, which never read the environment
//! themselves.
//!
//! # Examples
//!
//! ```sh
//! # Everything from the environment (typical cron setup)
//! NEWS_API_KEY=... SMTP_HOST=smtp.example.com SMTP_USER=bot@example.com \
//!   SMTP_PASSWORD=... TO_EMAIL=you@example.com news_alert
//!
//! # Preview the digest without sending anything
//! news_alert --dry-run
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Configuration for one alert run, immutable after parsing.
///
/// Missing required values fail the run before any network call is made.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// API key for the news headlines endpoint
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: String,

    /// Two-letter country code for top headlines
    #[arg(long, env = "NEWS_COUNTRY", default_value = "us")]
    pub news_country: String,

    /// Optional category filter (business, technology, ...)
    #[arg(long, env = "NEWS_CATEGORY")]
    pub news_category: Option<String>,

    /// Path of the JSON file tracking already-alerted article URLs
    #[arg(long, env = "STATE_FILE", default_value = ".news_seen.json")]
    pub state_file: PathBuf,

    /// Headlines requested from the API and included per email
    #[arg(long, env = "MAX_ITEMS_PER_EMAIL", default_value_t = 10)]
    pub max_items_per_email: u32,

    /// SMTP server hostname
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: String,

    /// SMTP server port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP login username, also the default sender address
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: String,

    /// SMTP login password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: String,

    /// Recipient address for the digest
    #[arg(long, env = "TO_EMAIL")]
    pub to_email: String,

    /// Sender address (defaults to the SMTP user)
    #[arg(long, env = "FROM_EMAIL")]
    pub from_email: Option<String>,

    /// Print the digest to stdout instead of sending mail; the state file
    /// is left untouched
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// The effective sender address: `FROM_EMAIL` when given, otherwise the
    /// SMTP user.
    pub fn sender(&self) -> &str {
        self.from_email.as_deref().unwrap_or(&self.smtp_user)
    }
}
