//! Storage trait for player profiles.
//!
//! Lets the PostgreSQL store and the in-memory store be used
//! interchangeably behind `Arc<dyn PlayerStore>`.

use async_trait::async_trait;

use crate::error::Result;

use super::types::Player;

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Backend name for logs ("postgres", "memory").
    fn backend_name(&self) -> &'static str;

    /// Fetch one player by id.
    ///
    /// `Ok(None)` when no such player exists. Malformed module lists come
    /// back empty rather than failing the call.
    async fn get_player(&self, player_id: &str) -> Result<Option<Player>>;

    /// Insert the player, or overwrite every mutable field if the id
    /// already exists. Leaves exactly one record per id.
    async fn save_player(&self, player: &Player) -> Result<()>;
}
