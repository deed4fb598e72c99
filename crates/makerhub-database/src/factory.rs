//! Store backend selection.

use std::sync::Arc;

use tracing::info;

use makerhub_core::config::{DatabaseConfig, StoreBackend};
use makerhub_core::result::AppResult;

use crate::connection::connect_pool;
use crate::memory::MemoryMakerspaceStore;
use crate::migration::run_migrations;
use crate::repositories::MakerspaceRepository;
use crate::store::MakerspaceStore;

/// Build the configured store backend.
///
/// Called once at startup; the returned handle is shared by every service.
/// The postgres backend connects and runs migrations before returning.
pub async fn build_store(config: &DatabaseConfig) -> AppResult<Arc<dyn MakerspaceStore>> {
    match config.backend {
        StoreBackend::Postgres => {
            let pool = connect_pool(config).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(MakerspaceRepository::new(pool)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory makerspace store; records are lost on restart");
            Ok(Arc::new(MemoryMakerspaceStore::new()))
        }
    }
}
