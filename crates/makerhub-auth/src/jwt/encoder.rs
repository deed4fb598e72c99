//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use makerhub_core::config::AuthConfig;
use makerhub_core::config::auth::MAX_CLAIM_TTL_HOURS;
use makerhub_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// A freshly minted claim token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClaimToken {
    /// The signed token.
    pub token: String,
    /// When the token stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed HS256 tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Claim token TTL.
    claim_ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("claim_ttl", &self.claim_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// The TTL is capped at [`MAX_CLAIM_TTL_HOURS`].
    pub fn new(config: &AuthConfig) -> Self {
        let hours = config.claim_token_ttl_hours.min(MAX_CLAIM_TTL_HOURS);
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            claim_ttl: chrono::Duration::hours(hours as i64),
        }
    }

    /// Mints an onboarding claim token bound to `email`.
    pub fn issue_claim_token(&self, email: &str) -> Result<ClaimToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.claim_ttl;
        let token = self.encode(&Claims::onboarding(email, now, expires_at))?;
        Ok(ClaimToken { token, expires_at })
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to encode token", e)
        })
    }
}
