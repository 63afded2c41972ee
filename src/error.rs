//! Error taxonomy for an alert run.
//!
//! Every class here is fatal: errors propagate to `main`, print a message,
//! and produce a non-zero exit. Nothing is retried in-process; the external
//! scheduler retries by re-invoking the binary, and the state file is only
//! written after a successful send, so a failed run never loses a batch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value (e.g. a malformed email address).
    /// Missing required flags or environment variables are rejected earlier
    /// by clap, before any network call.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The news API answered with a non-"ok" status, or with a body that
    /// does not parse as the expected shape. Carries the error payload.
    #[error("news API request failed: {0}")]
    Api(String),

    /// Network-level failure talking to the news API, including the
    /// 30-second timeout firing.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The state file exists but is not valid JSON of the expected shape.
    #[error("state file is corrupt: {0}")]
    StateCorrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The digest message itself could not be built.
    #[error("email message invalid: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection, STARTTLS, authentication, or delivery failure.
    #[error("email delivery failed: {0}")]
    Mail(#[from] lettre::transport::smtp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
