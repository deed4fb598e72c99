//! Public makerspace directory: lookups and profile edits.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use makerhub_core::error::AppError;
use makerhub_database::MakerspaceStore;
use makerhub_entity::makerspace::ActiveMakerspace;

use super::validation::validate_profile;
use crate::context::RequestContext;
use crate::timeout::bounded;

/// Record-level keys a profile patch can never set.
const PROTECTED_KEYS: [&str; 6] = [
    "id",
    "status",
    "claimToken",
    "createdAt",
    "activatedAt",
    "updatedAt",
];

/// Message for an update whose base profile changed before it was written.
pub const PROFILE_CHANGED: &str = "makerspace was modified by another request; retry";

/// Read and edit access to active makerspaces.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    /// Makerspace store.
    store: Arc<dyn MakerspaceStore>,
    /// Upper bound on each store call.
    call_timeout: Duration,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(store: Arc<dyn MakerspaceStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    /// Gets an active makerspace by id.
    pub async fn get(&self, id: Uuid) -> Result<ActiveMakerspace, AppError> {
        bounded(
            self.call_timeout,
            "find_active_by_id",
            self.store.find_active_by_id(id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("makerspace not found"))
    }

    /// Gets the first active makerspace whose name matches, ignoring case.
    pub async fn get_by_name(&self, name: &str) -> Result<ActiveMakerspace, AppError> {
        bounded(
            self.call_timeout,
            "find_active_by_name",
            self.store.find_active_by_name(name.trim()),
        )
        .await?
        .ok_or_else(|| AppError::not_found("makerspace not found"))
    }

    /// Lists the names of active makerspaces in a city.
    pub async fn names_in_city(&self, city: &str) -> Result<Vec<String>, AppError> {
        let names = bounded(
            self.call_timeout,
            "active_names_in_city",
            self.store.active_names_in_city(city.trim()),
        )
        .await?;

        if names.is_empty() {
            return Err(AppError::not_found("no makerspaces found in this city"));
        }
        Ok(names)
    }

    /// Shallow-merges `patch` over the current profile and stores the result.
    ///
    /// The merged profile must pass the same checks as finalization. The
    /// write only lands if nobody else updated the record in between;
    /// otherwise the call fails with `Conflict` and nothing changes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: &Value,
    ) -> Result<ActiveMakerspace, AppError> {
        let Some(changes) = patch.as_object() else {
            return Err(AppError::validation("Update body must be a JSON object"));
        };

        let current = self.get(id).await?;

        let mut merged = serde_json::to_value(&current.profile)?;
        if let Some(fields) = merged.as_object_mut() {
            for (key, value) in changes {
                if !PROTECTED_KEYS.contains(&key.as_str()) {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }

        let profile = validate_profile(&merged)?;

        let replaced = bounded(
            self.call_timeout,
            "replace_profile",
            self.store
                .replace_profile(id, current.updated_at, &profile, Utc::now()),
        )
        .await?;
        let Some(updated) = replaced else {
            // Either gone or changed since it was read.
            self.get(id).await?;
            return Err(AppError::conflict(PROFILE_CHANGED));
        };

        info!(
            makerspace_id = %id,
            editor = %ctx.email,
            onboarding_token = ctx.claims.is_onboarding(),
            fields = changes.len(),
            "Makerspace profile updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{auth_config, profile_payload, stalled_store};
    use async_trait::async_trait;
    use chrono::DateTime;
    use makerhub_auth::jwt::{JwtDecoder, JwtEncoder};
    use makerhub_core::error::ErrorKind;
    use makerhub_core::result::AppResult;
    use makerhub_database::MemoryMakerspaceStore;
    use makerhub_entity::makerspace::{MakerspaceProfile, MakerspaceRecord, PendingMakerspace};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn seed(store: &MemoryMakerspaceStore, email: &str, name: &str, city: &str) -> Uuid {
        store
            .insert_pending(&PendingMakerspace::new(email, format!("tok-{email}")))
            .await
            .unwrap();
        let profile = validate_profile(&profile_payload(name, city)).unwrap();
        store
            .activate(email, &profile, Utc::now())
            .await
            .unwrap()
            .unwrap()
            .id
    }

    fn ctx() -> RequestContext {
        let auth = auth_config();
        let token = JwtEncoder::new(&auth).issue_claim_token("editor@x.com").unwrap();
        RequestContext::from_claims(JwtDecoder::new(&auth).decode(&token.token).unwrap())
    }

    #[tokio::test]
    async fn test_get_hides_pending_records() {
        let store = MemoryMakerspaceStore::new();
        let pending = PendingMakerspace::new("p@x.com", "tok");
        let pending_id = pending.id;
        store.insert_pending(&pending).await.unwrap();
        let directory = DirectoryService::new(Arc::new(store), TIMEOUT);

        let err = directory.get(pending_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_by_name_and_city() {
        let store = MemoryMakerspaceStore::new();
        let id = seed(&store, "a@x.com", "TechHub", "Pune").await;
        seed(&store, "b@x.com", "Atelier", "Pune").await;
        let directory = DirectoryService::new(Arc::new(store), TIMEOUT);

        assert_eq!(directory.get_by_name("TECHHUB").await.unwrap().id, id);
        assert_eq!(
            directory.names_in_city("pune").await.unwrap(),
            vec!["Atelier".to_string(), "TechHub".to_string()]
        );

        let err = directory.names_in_city("Oslo").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "no makerspaces found in this city");
    }

    #[tokio::test]
    async fn test_update_merges_and_ignores_protected_keys() {
        let store = MemoryMakerspaceStore::new();
        let id = seed(&store, "a@x.com", "TechHub", "Pune").await;
        let directory = DirectoryService::new(Arc::new(store), TIMEOUT);

        let updated = directory
            .update(
                &ctx(),
                id,
                &json!({
                    "description": "Open late on Fridays",
                    "amenities": ["wifi", "coffee"],
                    "id": Uuid::new_v4(),
                    "status": "pending",
                    "claimToken": "forged"
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.profile.name, "TechHub");
        assert_eq!(
            updated.profile.description.as_deref(),
            Some("Open late on Fridays")
        );
        assert_eq!(updated.profile.amenities, vec!["wifi", "coffee"]);
        assert!(updated.updated_at >= updated.activated_at);
    }

    #[tokio::test]
    async fn test_update_revalidates_merged_profile() {
        let store = MemoryMakerspaceStore::new();
        let id = seed(&store, "a@x.com", "TechHub", "Pune").await;
        let directory = DirectoryService::new(Arc::new(store), TIMEOUT);

        let err = directory
            .update(&ctx(), id, &json!({ "name": "", "usage": "all" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let details = err.details.unwrap();
        assert_eq!(details["missingFields"], json!(["name"]));
        assert_eq!(details["invalidFields"], json!(["usage"]));

        assert_eq!(directory.get(id).await.unwrap().profile.name, "TechHub");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let directory = DirectoryService::new(Arc::new(MemoryMakerspaceStore::new()), TIMEOUT);
        let err = directory
            .update(&ctx(), Uuid::new_v4(), &json!({ "description": "x" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    /// Memory store where another writer edits a record right after the
    /// first time it is read.
    #[derive(Debug)]
    struct InterleavedWriter {
        inner: MemoryMakerspaceStore,
        armed: AtomicBool,
    }

    #[async_trait]
    impl MakerspaceStore for InterleavedWriter {
        async fn insert_pending(&self, pending: &PendingMakerspace) -> AppResult<()> {
            self.inner.insert_pending(pending).await
        }

        async fn find_pending_by_token(
            &self,
            token: &str,
        ) -> AppResult<Option<PendingMakerspace>> {
            self.inner.find_pending_by_token(token).await
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<MakerspaceRecord>> {
            self.inner.find_by_email(email).await
        }

        async fn activate(
            &self,
            email: &str,
            profile: &MakerspaceProfile,
            at: DateTime<Utc>,
        ) -> AppResult<Option<ActiveMakerspace>> {
            self.inner.activate(email, profile, at).await
        }

        async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<ActiveMakerspace>> {
            let read = self.inner.find_active_by_id(id).await?;
            if let Some(current) = &read {
                if self.armed.swap(false, Ordering::SeqCst) {
                    let mut profile = current.profile.clone();
                    profile.description = Some("Written elsewhere".into());
                    self.inner
                        .replace_profile(
                            id,
                            current.updated_at,
                            &profile,
                            current.updated_at + chrono::Duration::seconds(1),
                        )
                        .await?;
                }
            }
            Ok(read)
        }

        async fn find_active_by_name(&self, name: &str) -> AppResult<Option<ActiveMakerspace>> {
            self.inner.find_active_by_name(name).await
        }

        async fn active_names_in_city(&self, city: &str) -> AppResult<Vec<String>> {
            self.inner.active_names_in_city(city).await
        }

        async fn replace_profile(
            &self,
            id: Uuid,
            expected_updated_at: DateTime<Utc>,
            profile: &MakerspaceProfile,
            at: DateTime<Utc>,
        ) -> AppResult<Option<ActiveMakerspace>> {
            self.inner
                .replace_profile(id, expected_updated_at, profile, at)
                .await
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    async fn test_update_conflicts_when_record_changed_after_read() {
        let inner = MemoryMakerspaceStore::new();
        let id = seed(&inner, "a@x.com", "TechHub", "Pune").await;
        let store = Arc::new(InterleavedWriter {
            inner: inner.clone(),
            armed: AtomicBool::new(true),
        });
        let directory = DirectoryService::new(store, TIMEOUT);

        let err = directory
            .update(&ctx(), id, &json!({ "description": "Written second" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, PROFILE_CHANGED);

        let stored = inner.find_active_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.profile.description.as_deref(), Some("Written elsewhere"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_never_lose_a_patch() {
        let store = MemoryMakerspaceStore::new();
        let id = seed(&store, "a@x.com", "TechHub", "Pune").await;
        let directory = DirectoryService::new(Arc::new(store), TIMEOUT);

        let mut handles = Vec::new();
        for i in 0..8 {
            let directory = directory.clone();
            handles.push(tokio::spawn(async move {
                let field = format!("amenity-{i}");
                directory
                    .update(&ctx(), id, &json!({ "amenities": [field.clone()] }))
                    .await
                    .map(|_| field)
            }));
        }

        let mut applied = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(field) => applied.push(field),
                Err(e) => {
                    assert_eq!(e.kind, ErrorKind::Conflict);
                    assert_eq!(e.message, PROFILE_CHANGED);
                }
            }
        }
        assert!(!applied.is_empty());

        let amenities = directory.get(id).await.unwrap().profile.amenities;
        assert_eq!(amenities.len(), 1);
        assert!(applied.contains(&amenities[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_store_surfaces_unavailable() {
        let directory = DirectoryService::new(stalled_store(), TIMEOUT);
        let err = directory.names_in_city("Pune").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }
}
