//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use makerhub_core::config::AuthConfig;
use makerhub_core::error::AppError;

use super::claims::Claims;

/// Message returned for every signature, expiry, or format failure.
pub const INVALID_TOKEN: &str = "invalid or expired token";

/// Validates HS256 tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// Every failure maps to the same authentication error; the precise
    /// cause is only logged.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    JwtErrorKind::ExpiredSignature => "expired",
                    JwtErrorKind::InvalidSignature => "bad signature",
                    JwtErrorKind::InvalidToken => "malformed",
                    JwtErrorKind::Json(_) => "unexpected claims",
                    _ => "rejected",
                };
                debug!(reason, error = %e, "Token validation failed");
                AppError::authentication(INVALID_TOKEN)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::{Duration, Utc};
    use makerhub_core::error::ErrorKind;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            claim_token_ttl_hours: 24,
            leeway_seconds: 5,
        }
    }

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    #[test]
    fn test_round_trip_onboarding_token() {
        let encoder = JwtEncoder::new(&config(SECRET));
        let decoder = JwtDecoder::new(&config(SECRET));

        let issued = encoder.issue_claim_token("a@x.com").unwrap();
        let claims = decoder.decode(&issued.token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert!(claims.is_onboarding());
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        let ttl = claims.exp - claims.iat.unwrap().as_i64().unwrap();
        assert_eq!(ttl, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config("another-secret-another-secret-xx"));
        let decoder = JwtDecoder::new(&config(SECRET));

        let issued = encoder.issue_claim_token("a@x.com").unwrap();
        let err = decoder.decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, INVALID_TOKEN);
    }

    #[test]
    fn test_expired_token_rejected() {
        let encoder = JwtEncoder::new(&config(SECRET));
        let decoder = JwtDecoder::new(&config(SECRET));

        let now = Utc::now();
        let claims = Claims::onboarding(
            "a@x.com",
            now - Duration::hours(25),
            now - Duration::hours(1),
        );
        let token = encoder.encode(&claims).unwrap();

        let err = decoder.decode(&token).unwrap_err();
        assert_eq!(err.message, INVALID_TOKEN);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let encoder = JwtEncoder::new(&config(SECRET));
        let decoder = JwtDecoder::new(&config(SECRET));

        let token = encoder.issue_claim_token("a@x.com").unwrap().token;
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = encoder.issue_claim_token("mallory@x.com").unwrap().token;
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");

        assert!(decoder.decode(&tampered).is_err());
        assert!(decoder.decode("not-a-token").is_err());
    }

    #[test]
    fn test_extra_claims_preserved() {
        let encoder = JwtEncoder::new(&config(SECRET));
        let decoder = JwtDecoder::new(&config(SECRET));

        let mut claims =
            Claims::onboarding("u@x.com", Utc::now(), Utc::now() + Duration::hours(1));
        claims.purpose = None;
        claims.extra.insert("id".into(), serde_json::json!("1"));
        let token = encoder.encode(&claims).unwrap();

        let decoded = decoder.decode(&token).unwrap();
        assert!(!decoded.is_onboarding());
        assert_eq!(decoded.extra.get("id"), Some(&serde_json::json!("1")));
    }

    #[test]
    fn test_foreign_token_with_string_jti_accepted() {
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "id": "u1",
            "email": "u@x.com",
            "exp": now + 3600,
            "iat": now as f64 + 0.25,
            "jti": "abc123"
        });
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &payload,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = JwtDecoder::new(&config(SECRET)).decode(&token).unwrap();
        assert_eq!(claims.email, "u@x.com");
        assert_eq!(claims.jti.as_deref(), Some("abc123"));
        assert!(!claims.is_onboarding());
        assert_eq!(claims.extra.get("id"), Some(&serde_json::json!("u1")));
    }
}
