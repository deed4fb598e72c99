//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationErrors};

use makerhub_core::error::AppError;

/// Onboarding request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OnboardRequest {
    /// Email the makerspace will be claimed with.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is not a valid address")
    )]
    pub email: String,
}

impl OnboardRequest {
    /// Strips surrounding whitespace before validation.
    pub fn trimmed(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

/// Converts `validator` failures into a validation error naming each field.
pub fn validation_failed(errors: &ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();

    let mut fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
    fields.sort();

    let message = field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Request validation failed".to_string());

    AppError::validation(message).with_details(json!({ "invalidFields": fields }))
}
