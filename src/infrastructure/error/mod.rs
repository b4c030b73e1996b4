use thiserror::Error;

/// Errors surfaced by the data-access layer.
///
/// Missing records are not errors (lookups return `Option`), and malformed
/// JSON columns are recovered in place, so everything here means the
/// current operation failed.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DataError {
    /// Short machine-readable code, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            DataError::Config(_) => "CONFIG_ERROR",
            DataError::Database(sqlx::Error::PoolTimedOut) => "POOL_TIMEOUT",
            DataError::Database(_) => "DATABASE_ERROR",
            DataError::Migration(_) => "MIGRATION_ERROR",
            DataError::Encode(_) => "ENCODE_ERROR",
            DataError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// True when the pool gave up waiting for a free connection.
    pub fn is_pool_timeout(&self) -> bool {
        matches!(self, DataError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
