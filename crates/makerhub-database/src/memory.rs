//! In-memory makerspace store backed by a `DashMap`.
//!
//! Each email key lives in one shard, so entry-level operations hold the
//! shard lock for the whole check-and-write. That gives the same
//! insert-if-absent and filtered-update guarantees as the PostgreSQL
//! backend within one process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use makerhub_core::error::AppError;
use makerhub_core::result::AppResult;
use makerhub_entity::makerspace::{
    ActiveMakerspace, MakerspaceProfile, MakerspaceRecord, PendingMakerspace,
};

use crate::store::MakerspaceStore;

/// Process-local makerspace store keyed by claim email.
#[derive(Debug, Clone, Default)]
pub struct MemoryMakerspaceStore {
    records: Arc<DashMap<String, MakerspaceRecord>>,
}

impl MemoryMakerspaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records in any state.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn active_records(&self) -> Vec<ActiveMakerspace> {
        self.records
            .iter()
            .filter_map(|entry| match entry.value() {
                MakerspaceRecord::Active(a) => Some(a.clone()),
                MakerspaceRecord::Pending(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl MakerspaceStore for MemoryMakerspaceStore {
    async fn insert_pending(&self, pending: &PendingMakerspace) -> AppResult<()> {
        match self.records.entry(pending.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Makerspace with this email already exists",
            )),
            Entry::Vacant(slot) => {
                slot.insert(MakerspaceRecord::Pending(pending.clone()));
                debug!(id = %pending.id, "Inserted pending makerspace");
                Ok(())
            }
        }
    }

    async fn find_pending_by_token(&self, token: &str) -> AppResult<Option<PendingMakerspace>> {
        Ok(self.records.iter().find_map(|entry| match entry.value() {
            MakerspaceRecord::Pending(p) if p.claim_token == token => Some(p.clone()),
            _ => None,
        }))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<MakerspaceRecord>> {
        Ok(self.records.get(email).map(|entry| entry.value().clone()))
    }

    async fn activate(
        &self,
        email: &str,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        let Some(mut entry) = self.records.get_mut(email) else {
            return Ok(None);
        };
        let MakerspaceRecord::Pending(pending) = entry.value() else {
            return Ok(None);
        };

        let active = pending.clone().activate(profile.clone(), at);
        *entry = MakerspaceRecord::Active(active.clone());
        Ok(Some(active))
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<ActiveMakerspace>> {
        Ok(self.active_records().into_iter().find(|a| a.id == id))
    }

    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<ActiveMakerspace>> {
        let name = name.to_lowercase();
        Ok(self
            .active_records()
            .into_iter()
            .filter(|a| a.profile.name.to_lowercase() == name)
            .min_by_key(|a| a.activated_at))
    }

    async fn active_names_in_city(&self, city: &str) -> AppResult<Vec<String>> {
        let city = city.to_lowercase();
        let mut names: Vec<String> = self
            .active_records()
            .into_iter()
            .filter(|a| a.profile.city.to_lowercase() == city)
            .map(|a| a.profile.name)
            .collect();
        names.sort();
        Ok(names)
    }

    async fn replace_profile(
        &self,
        id: Uuid,
        expected_updated_at: DateTime<Utc>,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        let key = self
            .records
            .iter()
            .find(|entry| entry.value().id() == id)
            .map(|entry| entry.key().clone());
        let Some(key) = key else {
            return Ok(None);
        };

        let Some(mut entry) = self.records.get_mut(&key) else {
            return Ok(None);
        };
        match entry.value_mut() {
            MakerspaceRecord::Active(active)
                if active.id == id && active.updated_at == expected_updated_at =>
            {
                active.profile = profile.clone();
                active.updated_at = at;
                Ok(Some(active.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
