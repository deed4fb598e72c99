//! Shared fixtures for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use makerhub_core::config::AuthConfig;
use makerhub_core::result::AppResult;
use makerhub_core::traits::{Mailer, OutboundMail};
use makerhub_database::MakerspaceStore;
use makerhub_entity::makerspace::{
    ActiveMakerspace, MakerspaceProfile, MakerspaceRecord, PendingMakerspace,
};

pub const SECRET: &str = "service-tests-secret-service-tests";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: SECRET.to_string(),
        claim_token_ttl_hours: 24,
        leeway_seconds: 0,
    }
}

/// A complete, valid profile payload.
pub fn profile_payload(name: &str, city: &str) -> Value {
    json!({
        "type": "community",
        "usage": ["woodworking", "electronics"],
        "name": name,
        "email": "contact@space.test",
        "number": "555-0100",
        "inChargeName": "Grace",
        "timings": {
            "monday": "9-6", "tuesday": "9-6", "wednesday": "9-6",
            "thursday": "9-6", "friday": "9-6", "saturday": "10-2",
            "sunday": "Closed"
        },
        "city": city,
        "state": "MH",
        "address": "12 Workshop Road",
        "zipcode": "411001",
        "country": "IN"
    })
}

/// Mailer that records what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutboundMail) -> AppResult<()> {
        self.sent.lock().unwrap().push(mail);
        if self.fail {
            return Err(makerhub_core::AppError::internal("smtp down"));
        }
        Ok(())
    }
}

/// Store whose every call hangs.
#[derive(Debug, Default)]
pub struct StalledStore;

async fn stall<T>() -> AppResult<T> {
    std::future::pending().await
}

#[async_trait]
impl MakerspaceStore for StalledStore {
    async fn insert_pending(&self, _pending: &PendingMakerspace) -> AppResult<()> {
        stall().await
    }

    async fn find_pending_by_token(&self, _token: &str) -> AppResult<Option<PendingMakerspace>> {
        stall().await
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<MakerspaceRecord>> {
        stall().await
    }

    async fn activate(
        &self,
        _email: &str,
        _profile: &MakerspaceProfile,
        _at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        stall().await
    }

    async fn find_active_by_id(&self, _id: Uuid) -> AppResult<Option<ActiveMakerspace>> {
        stall().await
    }

    async fn find_active_by_name(&self, _name: &str) -> AppResult<Option<ActiveMakerspace>> {
        stall().await
    }

    async fn active_names_in_city(&self, _city: &str) -> AppResult<Vec<String>> {
        stall().await
    }

    async fn replace_profile(
        &self,
        _id: Uuid,
        _expected_updated_at: DateTime<Utc>,
        _profile: &MakerspaceProfile,
        _at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        stall().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        stall().await
    }
}

pub fn stalled_store() -> Arc<dyn MakerspaceStore> {
    Arc::new(StalledStore)
}
