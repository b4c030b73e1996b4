//! PostgreSQL persistence module.
//!
//! Provides the connection pool, the startup probe, and the embedded
//! schema migrations.

pub mod health;
pub mod pool;

pub use health::{test_database_connection, verify_player_key};
pub use pool::PostgresPool;

use sqlx::migrate::Migrator;

/// Schema migrations from `migrations/`, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
