//! Player profiles.
//!
//! - `types`: `Player`, `ModuleRef`, and the stored row form
//! - `store`: the `PlayerStore` trait
//! - `postgres_backend` / `memory_backend`: implementations
//! - `factory`: backend selection from configuration

pub mod factory;
pub mod memory_backend;
pub mod postgres_backend;
pub mod store;
pub mod types;

pub use factory::create_player_store;
pub use memory_backend::MemoryPlayerStore;
pub use postgres_backend::PostgresPlayerStore;
pub use store::PlayerStore;
pub use types::{validate_player_id, ModuleRef, Player, PlayerRow};
