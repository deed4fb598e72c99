//! Finalization of a pending registration.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use makerhub_core::error::AppError;
use makerhub_database::MakerspaceStore;
use makerhub_entity::makerspace::{ActiveMakerspace, MakerspaceRecord};

use super::normalize_email;
use super::validation::validate_profile;
use crate::context::RequestContext;
use crate::timeout::bounded;

/// Message for a finalize call with nothing left to claim.
pub const NO_PENDING_REGISTRATION: &str = "no pending registration";

/// Turns a pending registration into an active makerspace.
#[derive(Debug, Clone)]
pub struct MakerspaceFinalizer {
    /// Makerspace store.
    store: Arc<dyn MakerspaceStore>,
    /// Upper bound on each store call.
    call_timeout: Duration,
}

impl MakerspaceFinalizer {
    /// Creates a new finalizer.
    pub fn new(store: Arc<dyn MakerspaceStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    /// Validates `payload` and activates the caller's pending record.
    ///
    /// The record is chosen by the email in the caller's token, never by
    /// anything in the payload. The store is written exactly once, after
    /// validation has passed.
    pub async fn finalize(
        &self,
        ctx: &RequestContext,
        payload: &Value,
    ) -> Result<ActiveMakerspace, AppError> {
        let email = normalize_email(&ctx.email)
            .map_err(|_| AppError::not_found(NO_PENDING_REGISTRATION))?;

        let existing = bounded(
            self.call_timeout,
            "find_by_email",
            self.store.find_by_email(&email),
        )
        .await?;
        if !matches!(existing, Some(MakerspaceRecord::Pending(_))) {
            return Err(AppError::not_found(NO_PENDING_REGISTRATION));
        }

        let profile = validate_profile(payload)?;

        let active = bounded(
            self.call_timeout,
            "activate",
            self.store.activate(&email, &profile, Utc::now()),
        )
        .await?
        .ok_or_else(|| AppError::not_found(NO_PENDING_REGISTRATION))?;

        info!(
            makerspace_id = %active.id,
            name = %active.profile.name,
            onboarding_token = ctx.claims.is_onboarding(),
            "Makerspace finalized"
        );

        Ok(active)
    }
}
