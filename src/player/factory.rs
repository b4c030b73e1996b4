//! Player store factory

use std::sync::Arc;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::postgres::PostgresPool;

use super::memory_backend::MemoryPlayerStore;
use super::postgres_backend::PostgresPlayerStore;
use super::store::PlayerStore;

/// Create a player store based on configuration.
///
/// - `Postgres`: a `PostgresPlayerStore` if a pool is provided
/// - `Memory`: a `MemoryPlayerStore`
///
/// Falls back to memory (with a warning) when Postgres is requested but no
/// pool is given.
pub fn create_player_store(
    settings: &DatabaseConfig,
    postgres_pool: Option<&PostgresPool>,
) -> Arc<dyn PlayerStore> {
    match (settings.backend, postgres_pool) {
        (StoreBackend::Postgres, Some(pool)) => {
            tracing::info!(
                backend = "postgres",
                target_db = %pool.target(),
                "Creating PostgreSQL player store"
            );
            Arc::new(PostgresPlayerStore::new(pool.pool().clone()))
        }
        (StoreBackend::Postgres, None) => {
            tracing::warn!(
                "PostgreSQL player store requested but no pool provided, falling back to memory"
            );
            Arc::new(MemoryPlayerStore::new())
        }
        (StoreBackend::Memory, _) => {
            tracing::info!(backend = "memory", "Creating memory player store");
            Arc::new(MemoryPlayerStore::new())
        }
    }
}
