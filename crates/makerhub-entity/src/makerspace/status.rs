//! Makerspace lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a makerspace record.
///
/// The only transition is `Pending -> Active`, performed once by finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "makerspace_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MakerspaceStatus {
    /// Onboarding started; holds an unclaimed token.
    Pending,
    /// Profile finalized and publicly listed in the directory.
    Active,
}

impl MakerspaceStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for MakerspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MakerspaceStatus {
    type Err = makerhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            _ => Err(makerhub_core::AppError::validation(format!(
                "Invalid makerspace status: '{s}'. Expected one of: pending, active"
            ))),
        }
    }
}
