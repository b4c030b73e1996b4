//! Module catalog factory

use std::sync::Arc;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::postgres::PostgresPool;

use super::memory_backend::MemoryModuleCatalog;
use super::postgres_backend::PostgresModuleCatalog;
use super::store::ModuleCatalog;

/// Create a module catalog based on configuration.
///
/// Same selection rules as
/// [`create_player_store`](crate::player::create_player_store). The memory
/// catalog starts empty.
pub fn create_module_catalog(
    settings: &DatabaseConfig,
    postgres_pool: Option<&PostgresPool>,
) -> Arc<dyn ModuleCatalog> {
    match (settings.backend, postgres_pool) {
        (StoreBackend::Postgres, Some(pool)) => {
            tracing::info!(backend = "postgres", "Creating PostgreSQL module catalog");
            Arc::new(PostgresModuleCatalog::new(pool.pool().clone()))
        }
        (StoreBackend::Postgres, None) => {
            tracing::warn!(
                "PostgreSQL module catalog requested but no pool provided, falling back to memory"
            );
            Arc::new(MemoryModuleCatalog::new())
        }
        (StoreBackend::Memory, _) => {
            tracing::info!(backend = "memory", "Creating memory module catalog");
            Arc::new(MemoryModuleCatalog::new())
        }
    }
}
