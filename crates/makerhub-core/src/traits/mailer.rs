//! Outbound mail collaborator.

use async_trait::async_trait;

use crate::result::AppResult;

/// A single plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Trait for mail delivery backends.
///
/// Callers treat delivery as fire-and-forget: a returned error is logged
/// by the caller and never fails the operation that triggered the mail.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a message.
    async fn send(&self, mail: OutboundMail) -> AppResult<()>;
}
