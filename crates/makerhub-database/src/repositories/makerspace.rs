//! Makerspace repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use makerhub_core::error::{AppError, ErrorKind};
use makerhub_core::result::AppResult;
use makerhub_entity::makerspace::{
    ActiveMakerspace, MakerspaceProfile, MakerspaceRecord, MakerspaceStatus, PendingMakerspace,
};

use crate::store::MakerspaceStore;

/// Row shape of the `makerspaces` table.
#[derive(Debug, FromRow)]
struct MakerspaceRow {
    id: Uuid,
    email: String,
    status: MakerspaceStatus,
    claim_token: Option<String>,
    profile: Option<Json<MakerspaceProfile>>,
    created_at: DateTime<Utc>,
    activated_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MakerspaceRow> for MakerspaceRecord {
    type Error = AppError;

    fn try_from(row: MakerspaceRow) -> Result<Self, Self::Error> {
        match (row.status, row.claim_token, row.profile, row.activated_at) {
            (MakerspaceStatus::Pending, Some(claim_token), None, _) => {
                Ok(Self::Pending(PendingMakerspace {
                    id: row.id,
                    email: row.email,
                    claim_token,
                    created_at: row.created_at,
                }))
            }
            (MakerspaceStatus::Active, None, Some(Json(profile)), Some(activated_at)) => {
                Ok(Self::Active(ActiveMakerspace {
                    id: row.id,
                    email: row.email,
                    profile,
                    created_at: row.created_at,
                    activated_at,
                    updated_at: row.updated_at,
                }))
            }
            _ => Err(AppError::database(format!(
                "Makerspace row {} violates the lifecycle shape for status '{}'",
                row.id, row.status
            ))),
        }
    }
}

fn into_pending(row: MakerspaceRow) -> AppResult<PendingMakerspace> {
    match MakerspaceRecord::try_from(row)? {
        MakerspaceRecord::Pending(p) => Ok(p),
        MakerspaceRecord::Active(a) => Err(AppError::database(format!(
            "Expected pending makerspace, found active record {}",
            a.id
        ))),
    }
}

fn into_active(row: MakerspaceRow) -> AppResult<ActiveMakerspace> {
    match MakerspaceRecord::try_from(row)? {
        MakerspaceRecord::Active(a) => Ok(a),
        MakerspaceRecord::Pending(p) => Err(AppError::database(format!(
            "Expected active makerspace, found pending record {}",
            p.id
        ))),
    }
}

/// Repository for makerspace records in PostgreSQL.
#[derive(Debug, Clone)]
pub struct MakerspaceRepository {
    pool: PgPool,
}

impl MakerspaceRepository {
    /// Create a new makerspace repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MakerspaceStore for MakerspaceRepository {
    async fn insert_pending(&self, pending: &PendingMakerspace) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO makerspaces (id, email, status, claim_token, created_at, updated_at) \
             VALUES ($1, $2, 'pending', $3, $4, $4) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(pending.id)
        .bind(&pending.email)
        .bind(&pending.claim_token)
        .bind(pending.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert pending makerspace", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(
                "Makerspace with this email already exists",
            ));
        }
        Ok(())
    }

    async fn find_pending_by_token(&self, token: &str) -> AppResult<Option<PendingMakerspace>> {
        let row = sqlx::query_as::<_, MakerspaceRow>(
            "SELECT * FROM makerspaces WHERE claim_token = $1 AND status = 'pending'",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find makerspace by token", e)
        })?;

        row.map(into_pending).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<MakerspaceRecord>> {
        let row = sqlx::query_as::<_, MakerspaceRow>("SELECT * FROM makerspaces WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find makerspace by email", e)
            })?;

        row.map(MakerspaceRecord::try_from).transpose()
    }

    async fn activate(
        &self,
        email: &str,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        let row = sqlx::query_as::<_, MakerspaceRow>(
            "UPDATE makerspaces \
             SET status = 'active', claim_token = NULL, profile = $2, \
                 activated_at = $3, updated_at = $3 \
             WHERE email = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(email)
        .bind(Json(profile))
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate makerspace", e))?;

        row.map(into_active).transpose()
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<ActiveMakerspace>> {
        let row = sqlx::query_as::<_, MakerspaceRow>(
            "SELECT * FROM makerspaces WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find makerspace by id", e)
        })?;

        row.map(into_active).transpose()
    }

    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<ActiveMakerspace>> {
        let row = sqlx::query_as::<_, MakerspaceRow>(
            "SELECT * FROM makerspaces \
             WHERE status = 'active' AND LOWER(profile->>'name') = LOWER($1) \
             ORDER BY activated_at ASC LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find makerspace by name", e)
        })?;

        row.map(into_active).transpose()
    }

    async fn active_names_in_city(&self, city: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT profile->>'name' AS name FROM makerspaces \
             WHERE status = 'active' AND LOWER(profile->>'city') = LOWER($1) \
             ORDER BY name ASC",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list makerspaces by city", e)
        })
    }

    async fn replace_profile(
        &self,
        id: Uuid,
        expected_updated_at: DateTime<Utc>,
        profile: &MakerspaceProfile,
        at: DateTime<Utc>,
    ) -> AppResult<Option<ActiveMakerspace>> {
        let row = sqlx::query_as::<_, MakerspaceRow>(
            "UPDATE makerspaces SET profile = $2, updated_at = $3 \
             WHERE id = $1 AND status = 'active' AND updated_at = $4 \
             RETURNING *",
        )
        .bind(id)
        .bind(Json(profile))
        .bind(at)
        .bind(expected_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update makerspace profile", e)
        })?;

        row.map(into_active).transpose()
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
