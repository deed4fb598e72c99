//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use makerhub_auth::jwt::ClaimToken;
use makerhub_entity::makerspace::{ActiveMakerspace, MakerspaceProfile, MakerspaceStatus};

/// Onboarding response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardResponse {
    /// Claim token to present when finalizing.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

impl From<ClaimToken> for OnboardResponse {
    fn from(ticket: ClaimToken) -> Self {
        Self {
            token: ticket.token,
            expires_at: ticket.expires_at,
        }
    }
}

/// Public view of an active makerspace: record fields plus the flattened
/// profile. The claim email is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerspaceResponse {
    /// Record ID.
    pub id: Uuid,
    /// Always `active`.
    pub status: MakerspaceStatus,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: MakerspaceProfile,
    /// Onboarding time.
    pub created_at: DateTime<Utc>,
    /// Finalization time.
    pub activated_at: DateTime<Utc>,
    /// Last profile write.
    pub updated_at: DateTime<Utc>,
}

impl From<ActiveMakerspace> for MakerspaceResponse {
    fn from(m: ActiveMakerspace) -> Self {
        Self {
            id: m.id,
            status: MakerspaceStatus::Active,
            profile: m.profile,
            created_at: m.created_at,
            activated_at: m.activated_at,
            updated_at: m.updated_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub store: String,
}
