//! Onboarding and claim verification.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use makerhub_auth::jwt::{ClaimToken, JwtDecoder, JwtEncoder};
use makerhub_core::config::MailConfig;
use makerhub_core::error::AppError;
use makerhub_core::traits::{Mailer, OutboundMail};
use makerhub_database::MakerspaceStore;
use makerhub_entity::makerspace::PendingMakerspace;

use super::normalize_email;
use crate::timeout::bounded;

/// Result of checking a claim token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimVerification {
    /// Whether the token still claims a pending registration.
    pub is_valid: bool,
    /// Email the token is bound to, when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ClaimVerification {
    fn valid(email: String) -> Self {
        Self {
            is_valid: true,
            email: Some(email),
        }
    }

    fn invalid() -> Self {
        Self {
            is_valid: false,
            email: None,
        }
    }
}

/// Starts makerspace registrations and answers claim-token checks.
#[derive(Debug, Clone)]
pub struct OnboardingService {
    /// Makerspace store.
    store: Arc<dyn MakerspaceStore>,
    /// Claim token signer.
    encoder: Arc<JwtEncoder>,
    /// Claim token verifier.
    decoder: Arc<JwtDecoder>,
    /// Claim link delivery.
    mailer: Arc<dyn Mailer>,
    /// Mail settings.
    mail: MailConfig,
    /// Upper bound on each store or mail call.
    call_timeout: Duration,
}

impl OnboardingService {
    /// Creates a new onboarding service.
    pub fn new(
        store: Arc<dyn MakerspaceStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        mailer: Arc<dyn Mailer>,
        mail: MailConfig,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            encoder,
            decoder,
            mailer,
            mail,
            call_timeout,
        }
    }

    /// Registers a pending makerspace for `email` and issues its claim token.
    ///
    /// Fails with `Conflict` if any record, pending or active, already
    /// uses the email.
    pub async fn begin_onboarding(&self, email: &str) -> Result<ClaimToken, AppError> {
        let email = normalize_email(email)?;
        let ticket = self.encoder.issue_claim_token(&email)?;

        let pending = PendingMakerspace::new(&email, &ticket.token);
        bounded(
            self.call_timeout,
            "insert_pending",
            self.store.insert_pending(&pending),
        )
        .await?;

        info!(
            makerspace_id = %pending.id,
            expires_at = %ticket.expires_at,
            "Makerspace onboarding started"
        );

        if self.mail.enabled {
            self.send_claim_link(&email, &ticket).await;
        }

        Ok(ticket)
    }

    /// Reports whether `token` still claims a pending registration.
    ///
    /// A token that fails signature or expiry checks is never valid, even
    /// if a pending record still holds it.
    pub async fn verify_claim(&self, token: &str) -> Result<ClaimVerification, AppError> {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(ClaimVerification::invalid()),
        };

        let pending = bounded(
            self.call_timeout,
            "find_pending_by_token",
            self.store.find_pending_by_token(token),
        )
        .await?;

        match pending {
            Some(p) if p.email.eq_ignore_ascii_case(claims.email.trim()) => {
                Ok(ClaimVerification::valid(p.email))
            }
            Some(p) => {
                warn!(
                    makerspace_id = %p.id,
                    "Stored claim token is bound to a different email"
                );
                Ok(ClaimVerification::invalid())
            }
            None => Ok(ClaimVerification::invalid()),
        }
    }

    async fn send_claim_link(&self, email: &str, ticket: &ClaimToken) {
        let base = self.mail.claim_link_base.trim_end_matches('/');
        let mail = OutboundMail {
            to: email.to_string(),
            subject: "Finish registering your makerspace".to_string(),
            body: format!(
                "Use the link below to complete your makerspace profile.\n\n\
                 {base}/{token}\n\n\
                 The link expires at {expires}.",
                token = ticket.token,
                expires = ticket.expires_at.to_rfc3339(),
            ),
        };

        match tokio::time::timeout(self.call_timeout, self.mailer.send(mail)).await {
            Ok(Ok(())) => debug!("Claim link sent"),
            Ok(Err(e)) => warn!(error = %e, "Failed to send claim link"),
            Err(_) => warn!(
                timeout_ms = self.call_timeout.as_millis() as u64,
                "Claim link delivery timed out"
            ),
        }
    }
}
