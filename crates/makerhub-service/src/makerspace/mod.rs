//! Makerspace lifecycle services: onboarding, claim verification,
//! finalization, and the public directory.

pub mod directory;
pub mod finalize;
pub mod onboarding;
pub mod validation;

pub use directory::DirectoryService;
pub use finalize::MakerspaceFinalizer;
pub use onboarding::{ClaimVerification, OnboardingService};
pub use validation::{ProfileIssues, validate_profile};

use serde_json::json;
use validator::ValidateEmail;

use makerhub_core::error::AppError;

/// Trim and lower-case an email, rejecting blank or malformed input.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("Email is required")
            .with_details(json!({ "missingFields": ["email"] })));
    }

    if !email.validate_email() {
        return Err(AppError::validation("Email is not a valid address")
            .with_details(json!({ "invalidFields": ["email"] })));
    }

    Ok(email)
}
