//! PostgreSQL connection pool.

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::{Connection, Postgres};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::metrics::PoolMetrics;
use crate::postgres::MIGRATOR;

/// Bounded pool of PostgreSQL connections.
///
/// Construction is lazy: no connection is opened until the first acquire,
/// so a fresh pool says nothing about reachability. Use
/// [`test_database_connection`](super::test_database_connection) for that.
#[derive(Clone)]
pub struct PostgresPool {
    /// The underlying connection pool
    pool: PgPool,

    /// `user@host:port/db`, safe to log
    target: String,
}

impl PostgresPool {
    /// Create a new PostgreSQL pool from configuration.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        tracing::info!(
            target_db = %config,
            max_connections = config.max_connections,
            "Attempting to connect to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(config.idle_timeout())
            .acquire_timeout(config.connect_timeout())
            // Liveness is checked in before_acquire so failures get logged
            .test_before_acquire(false)
            .after_connect(|_conn, _meta| {
                Box::pin(async move {
                    PoolMetrics::record_connection_opened();
                    tracing::debug!("Database connection pool connected");
                    Ok(())
                })
            })
            .before_acquire(|conn, meta| {
                Box::pin(async move {
                    match conn.ping().await {
                        Ok(()) => Ok(true),
                        Err(e) => {
                            PoolMetrics::record_stale_connection();
                            tracing::warn!(
                                error = %e,
                                idle_ms = meta.idle_for.as_millis() as u64,
                                "Unexpected error on idle connection, discarding"
                            );
                            Ok(false)
                        }
                    }
                })
            })
            .connect_lazy_with(options);

        Self {
            pool,
            target: config.to_string(),
        }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Borrow a connection. It goes back to the pool when dropped.
    ///
    /// Fails with `PoolTimedOut` if none frees up within the acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        Ok(self.pool.acquire().await?)
    }

    /// Apply the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!(target_db = %self.target, "Database migrations applied");
        Ok(())
    }

    /// Connection target without credentials.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Open connections, idle or in use.
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Close the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target_db = %self.target, "PostgreSQL connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_is_lazy() {
        // Nothing listens here; construction must still succeed.
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        };
        let pool = PostgresPool::new(&config);
        assert_eq!(pool.size(), 0);
        assert!(!pool.is_closed());
    }

    #[tokio::test]
    async fn test_target_hides_password() {
        let config = DatabaseConfig {
            password: "topsecret".to_string(),
            ..Default::default()
        };
        let pool = PostgresPool::new(&config);
        assert_eq!(pool.target(), "postgres@localhost:5432/modular_mech_battler");
        assert!(!pool.target().contains("topsecret"));
    }

    #[tokio::test]
    async fn test_close_marks_pool_closed() {
        let pool = PostgresPool::new(&DatabaseConfig::default());
        pool.close().await;
        assert!(pool.is_closed());
        let err = pool.acquire().await.unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
