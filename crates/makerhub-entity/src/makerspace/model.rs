//! Makerspace record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::MakerspaceProfile;
use super::status::MakerspaceStatus;

/// A stored makerspace document, one variant per lifecycle state.
///
/// Serialized with a `status` tag, so a pending record reads
/// `{"status": "pending", "id": .., "email": .., "claimToken": ..}`.
/// The claim token only exists on [`PendingMakerspace`]; the profile only
/// exists on [`ActiveMakerspace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MakerspaceRecord {
    /// Onboarding started, awaiting finalization.
    Pending(PendingMakerspace),
    /// Finalized and listed.
    Active(ActiveMakerspace),
}

/// A makerspace stub created at onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMakerspace {
    /// Record identifier, stable across finalization.
    pub id: Uuid,
    /// Claim key; lower-cased.
    pub email: String,
    /// Signed onboarding token bound to `email`.
    pub claim_token: String,
    /// When onboarding started.
    pub created_at: DateTime<Utc>,
}

/// A finalized makerspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveMakerspace {
    /// Record identifier.
    pub id: Uuid,
    /// Claim key the record was onboarded with.
    pub email: String,
    /// Public profile.
    pub profile: MakerspaceProfile,
    /// When onboarding started.
    pub created_at: DateTime<Utc>,
    /// When the record was finalized.
    pub activated_at: DateTime<Utc>,
    /// When the profile was last written.
    pub updated_at: DateTime<Utc>,
}

impl PendingMakerspace {
    /// Create a new pending stub with a fresh id.
    pub fn new(email: impl Into<String>, claim_token: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            claim_token: claim_token.into(),
            created_at: Utc::now(),
        }
    }

    /// Consume the stub into an active record, dropping the claim token.
    pub fn activate(self, profile: MakerspaceProfile, at: DateTime<Utc>) -> ActiveMakerspace {
        ActiveMakerspace {
            id: self.id,
            email: self.email,
            profile,
            created_at: self.created_at,
            activated_at: at,
            updated_at: at,
        }
    }
}

impl MakerspaceRecord {
    /// Record identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Pending(p) => p.id,
            Self::Active(a) => a.id,
        }
    }

    /// Lifecycle status.
    pub fn status(&self) -> MakerspaceStatus {
        match self {
            Self::Pending(_) => MakerspaceStatus::Pending,
            Self::Active(_) => MakerspaceStatus::Active,
        }
    }

    /// Claim token, present only while pending.
    pub fn claim_token(&self) -> Option<&str> {
        match self {
            Self::Pending(p) => Some(&p.claim_token),
            Self::Active(_) => None,
        }
    }
}

impl From<PendingMakerspace> for MakerspaceRecord {
    fn from(p: PendingMakerspace) -> Self {
        Self::Pending(p)
    }
}

impl From<ActiveMakerspace> for MakerspaceRecord {
    fn from(a: ActiveMakerspace) -> Self {
        Self::Active(a)
    }
}
