//! Startup liveness probe and schema sanity checks.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::metrics::QueryTimer;

use super::PostgresPool;

/// Acquire one connection, run `SELECT NOW()`, and release it.
///
/// The connection is released on every path (it is dropped before the
/// result is inspected). Failures are logged and returned so the caller can
/// decide whether to abort startup. Returns the database server's clock.
pub async fn test_database_connection(pool: &PostgresPool) -> Result<DateTime<Utc>> {
    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(
                target_db = %pool.target(),
                code = e.code(),
                error = %e,
                "Failed to connect to the database"
            );
            return Err(e);
        }
    };
    tracing::info!("Acquired connection from pool");

    let timer = QueryTimer::start("probe");
    let result = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(&mut *conn)
        .await;

    drop(conn);
    tracing::debug!("Database connection released");

    match result {
        Ok(server_time) => {
            timer.success();
            tracing::info!(server_time = %server_time, "Database query successful");
            Ok(server_time)
        }
        Err(e) => {
            timer.failure();
            tracing::error!(error = %e, "Database probe query failed");
            Err(e.into())
        }
    }
}

/// Check that `players.player_id` is covered by a single-column primary key
/// or unique index.
///
/// Without one, `ON CONFLICT (player_id)` is rejected by PostgreSQL and saves
/// fail. Returns `false` (and logs a warning) when no such index exists,
/// including when the table itself is missing.
pub async fn verify_player_key(pool: &PgPool) -> Result<bool> {
    let covered: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_index i
            JOIN pg_attribute a
              ON a.attrelid = i.indrelid AND a.attnum = i.indkey[0]
            WHERE i.indrelid = to_regclass('players')::oid
              AND (i.indisprimary OR i.indisunique)
              AND i.indnkeyatts = 1
              AND a.attname = 'player_id'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if covered {
        tracing::debug!("players.player_id is uniquely indexed");
    } else {
        tracing::warn!(
            "players.player_id has no primary key or unique index; player upserts will fail"
        );
    }

    Ok(covered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn test_probe_fails_fast_when_unreachable() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            connect_timeout_ms: 200,
            ..Default::default()
        };
        let pool = PostgresPool::new(&config);

        let result = test_database_connection(&pool).await;
        assert!(result.is_err());
        // Nothing is left checked out after the failure
        assert_eq!(pool.pool().num_idle(), 0);
        assert_eq!(pool.size(), 0);
    }
}
