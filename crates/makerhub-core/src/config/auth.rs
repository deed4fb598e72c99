//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted claim token validity window, in hours (30 days).
pub const MAX_CLAIM_TTL_HOURS: u64 = 720;

/// Token signing and validation configuration.
///
/// The signing secret has no shipped default; it must come from a
/// configuration file or `MAKERHUB__AUTH__JWT_SECRET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default, skip_serializing)]
    pub jwt_secret: String,
    /// Claim token validity window in hours.
    #[serde(default = "default_claim_ttl")]
    pub claim_token_ttl_hours: u64,
    /// Allowed clock skew when validating `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_claim_ttl() -> u64 {
    24
}

fn default_leeway() -> u64 {
    5
}
