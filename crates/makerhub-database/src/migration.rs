//! Makerspace schema migrations, embedded at compile time.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use makerhub_core::error::{AppError, ErrorKind};
use makerhub_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the makerspace schema up to date.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let latest = MIGRATOR.iter().map(|m| m.version).max();
    info!(
        available = MIGRATOR.iter().count(),
        latest = ?latest,
        "Applying makerspace schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Makerspace schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Makerspace schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_makerspaces_table_migration_embedded() {
        assert!(
            MIGRATOR
                .iter()
                .any(|m| m.description.contains("create makerspaces"))
        );
    }
}
