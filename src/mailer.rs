//! SMTP digest delivery.
//!
//! One plain-text message, one recipient, one connection per run: the
//! transport speaks STARTTLS on the configured port (587 by default), logs
//! in with the SMTP credentials, sends, and releases the connection whether
//! or not the send succeeded. Failures surface as [`Error::Mail`] or
//! [`Error::Message`] and are never retried here — the next scheduled run
//! re-alerts the same batch because the seen set is only persisted after a
//! successful send.

use crate::cli::Cli;
use crate::error::{Error, Result};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, instrument};

/// Upper bound on the whole SMTP exchange.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Digest email sender, holding the resolved connection parameters.
#[derive(Debug)]
pub struct Mailer {
    host: String,
    port: u16,
    user: String,
    password: String,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    /// Build a mailer from the run configuration.
    ///
    /// Resolves the sender (FROM_EMAIL, defaulting to the SMTP user) and
    /// recipient mailboxes up front so that a malformed address fails as a
    /// configuration error before any SMTP traffic.
    pub fn from_cli(cfg: &Cli) -> Result<Self> {
        let from: Mailbox = cfg
            .sender()
            .parse()
            .map_err(|e| Error::Config(format!("invalid sender address {:?}: {e}", cfg.sender())))?;
        let to: Mailbox = cfg
            .to_email
            .parse()
            .map_err(|e| Error::Config(format!("invalid recipient address {:?}: {e}", cfg.to_email)))?;

        Ok(Self {
            host: cfg.smtp_host.clone(),
            port: cfg.smtp_port,
            user: cfg.smtp_user.clone(),
            password: cfg.smtp_password.clone(),
            from,
            to,
        })
    }

    /// Send one plain-text email with the given subject and body.
    #[instrument(level = "info", skip_all, fields(subject = %subject))]
    pub async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let credentials = Credentials::new(self.user.clone(), self.password.clone());
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
                .port(self.port)
                .credentials(credentials)
                .timeout(Some(SMTP_TIMEOUT))
                .build();

        transport.send(email).await?;
        info!(to = %self.to, "Digest email sent");
        Ok(())
    }
}
