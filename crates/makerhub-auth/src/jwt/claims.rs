//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// `purpose` value carried by onboarding claim tokens.
pub const ONBOARDING_PURPOSE: &str = "onboarding";

/// Claims payload accepted by the authorization gate.
///
/// Only `email` and `exp` are required; tokens minted elsewhere may carry
/// arbitrary extra claims, which are kept in `extra` and handed to
/// downstream handlers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Email the token is bound to.
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at NumericDate; other issuers may send fractional seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<Number>,
    /// Token ID. Onboarding tokens use a UUID; any string is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// What the token was issued for, e.g. [`ONBOARDING_PURPOSE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Any other claims present in the token.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Claims for a fresh onboarding token.
    pub fn onboarding(
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            exp: expires_at.timestamp(),
            iat: Some(Number::from(issued_at.timestamp())),
            jti: Some(Uuid::new_v4().to_string()),
            purpose: Some(ONBOARDING_PURPOSE.to_string()),
            extra: Map::new(),
        }
    }

    /// Whether this token was minted by onboarding.
    pub fn is_onboarding(&self) -> bool {
        self.purpose.as_deref() == Some(ONBOARDING_PURPOSE)
    }
}
