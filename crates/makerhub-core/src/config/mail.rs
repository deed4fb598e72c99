//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the claim-link mail sent after onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether onboarding sends a claim link.
    #[serde(default)]
    pub enabled: bool,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Base URL of the claim page; the token is appended as a path segment.
    #[serde(default = "default_claim_link_base")]
    pub claim_link_base: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            from_address: default_from(),
            claim_link_base: default_claim_link_base(),
        }
    }
}

fn default_from() -> String {
    "no-reply@makerhub.local".to_string()
}

fn default_claim_link_base() -> String {
    "http://localhost:3000/claim".to_string()
}
