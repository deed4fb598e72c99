//! Mail delivery backends.

use async_trait::async_trait;
use tracing::info;

use makerhub_core::result::AppResult;
use makerhub_core::traits::{Mailer, OutboundMail};

/// Mailer that writes messages to the log instead of delivering them.
///
/// Used in development and whenever no real transport is configured.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Creates a log mailer with the given sender address.
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutboundMail) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %mail.to,
            subject = %mail.subject,
            body_len = mail.body.len(),
            "Mail delivery (log transport)"
        );
        Ok(())
    }
}
