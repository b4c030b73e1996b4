use std::env;
use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// Which storage implementation backs the player store and module catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Connection settings for the PostgreSQL pool.
///
/// Read from `DB_*` environment variables (`DB_HOST`, `DB_PORT`, `DB_USER`,
/// `DB_PASSWORD`, `DB_NAME`, `DB_MAX_CONNECTIONS`, `DB_IDLE_TIMEOUT_MS`,
/// `DB_CONNECT_TIMEOUT_MS`, `DB_RUN_MIGRATIONS`, `DB_BACKEND`).
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_password")]
    pub password: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Upper bound on open connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a connection may sit idle before the pool closes it
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
    /// How long to wait for a connection before giving up
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Apply embedded migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Log output format, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_password() -> String {
    "password".to_string()
}

fn default_db_name() -> String {
    "modular_mech_battler".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_idle_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        Self::from_env_source(None)
    }

    /// Build settings from an explicit variable map instead of the process
    /// environment. `None` reads the real environment.
    pub fn from_env_source(source: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let database = Config::builder()
            .set_default("host", default_db_host())?
            .set_default("port", i64::from(default_db_port()))?
            .set_default("user", default_db_user())?
            .set_default("password", default_db_password())?
            .set_default("name", default_db_name())?
            // Load config files if they exist
            .add_source(File::with_name("config/database").required(false))
            .add_source(File::with_name(&format!("config/database.{}", run_mode)).required(false))
            // DB_HOST, DB_PORT, DB_MAX_CONNECTIONS, ...
            // Values stay strings; numeric fields are converted on deserialize
            .add_source(Environment::with_prefix("DB").source(source.clone()))
            .build()?
            .try_deserialize::<DatabaseConfig>()?;

        let log = Config::builder()
            .add_source(Environment::with_prefix("LOG").source(source))
            .build()?
            .try_deserialize::<LogConfig>()?;

        Ok(Self { database, log })
    }
}

impl DatabaseConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: default_db_password(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            idle_timeout_ms: default_idle_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            run_migrations: false,
            backend: StoreBackend::default(),
        }
    }
}

// Password is never printed
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout_ms", &self.idle_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("run_migrations", &self.run_migrations)
            .field("backend", &self.backend)
            .finish()
    }
}

impl fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}
