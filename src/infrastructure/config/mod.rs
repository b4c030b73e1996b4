mod settings;

pub use settings::{DatabaseConfig, LogConfig, LogFormat, Settings, StoreBackend};
