// Infrastructure layer (shared components)
pub mod infrastructure;

// Re-export infrastructure modules at the crate root
pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::metrics;
pub use infrastructure::postgres;

// Domain layer
pub mod catalog;
pub mod codec;
pub mod player;

// Supporting modules
pub mod telemetry;

pub use crate::infrastructure::error::{DataError, Result};
pub use crate::infrastructure::postgres::MIGRATOR;
