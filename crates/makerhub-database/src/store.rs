//! Makerspace store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use makerhub_core::result::AppResult;
use makerhub_entity::makerspace::{
    ActiveMakerspace, MakerspaceProfile, MakerspaceRecord, PendingMakerspace,
};

/// Document store holding makerspace records, one per email.
///
/// Every state transition is a single atomic operation at the store:
/// `insert_pending` is insert-if-absent on the email key, and `activate`
/// is an update filtered on `{email, status: pending}`. Implementations
/// must not emulate either with a read followed by a write.
#[async_trait]
pub trait MakerspaceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a pending stub. Fails with `Conflict` if any record
    /// (pending or active) already uses the email.
    async fn insert_pending(&self, pending: &PendingMakerspace) -> AppResult<()>;

    /// Find a pending record by its stored claim token.
    async fn find_pending_by_token(&self, token: &str) -> AppResult<Option<PendingMakerspace>>;

    /// Find any record by its claim email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<MakerspaceRecord>>;

    /// Transition the pending record for `email` to active.
    ///
    /// Returns `None` when no pending record matches, including when a
    /// concurrent call already activated it.
    async fn activate(
        &self,
        email: &str,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>>;

    /// Find an active record by id.
    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<ActiveMakerspace>>;

    /// Find the earliest-activated active record whose name matches
    /// case-insensitively.
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<ActiveMakerspace>>;

    /// Names of active records in a city (case-insensitive), sorted.
    async fn active_names_in_city(&self, city: &str) -> AppResult<Vec<String>>;

    /// Overwrite the profile of an active record, provided its
    /// `updated_at` still equals `expected_updated_at`.
    ///
    /// Returns `None` if no active record has the id or the record changed
    /// since it was read.
    async fn replace_profile(
        &self,
        id: Uuid,
        expected_updated_at: DateTime<Utc>,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
