//! Module catalog: the externally seeded list of mech modules.

pub mod factory;
pub mod memory_backend;
pub mod postgres_backend;
pub mod store;
pub mod types;

pub use factory::create_module_catalog;
pub use memory_backend::MemoryModuleCatalog;
pub use postgres_backend::PostgresModuleCatalog;
pub use store::ModuleCatalog;
pub use types::{Module, ModuleRow, ModuleStats, StatValue};
