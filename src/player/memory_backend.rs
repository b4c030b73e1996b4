//! In-memory player store using DashMap.
//!
//! Rows are kept in their stored form (JSON columns as text) and decoded on
//! read, exactly like the PostgreSQL store. Data is lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::store::PlayerStore;
use super::types::{validate_player_id, Player, PlayerRow};

#[derive(Default)]
pub struct MemoryPlayerStore {
    /// Rows keyed by player id
    rows: DashMap<String, PlayerRow>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a row as-is, bypassing encoding. Useful for seeding rows whose
    /// JSON columns hold arbitrary text.
    pub fn insert_row(&self, row: PlayerRow) {
        self.rows.insert(row.player_id.clone(), row);
    }

    /// Stored row for an id, JSON columns undecoded.
    pub fn row(&self, player_id: &str) -> Option<PlayerRow> {
        self.rows.get(player_id).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_player(&self, player_id: &str) -> Result<Option<Player>> {
        validate_player_id(player_id)?;

        let row = self.rows.get(player_id).map(|r| r.clone());
        Ok(row.map(PlayerRow::into_player))
    }

    async fn save_player(&self, player: &Player) -> Result<()> {
        validate_player_id(&player.player_id)?;
        let row = PlayerRow::from_player(player)?;

        // insert replaces the whole row under the shard lock
        self.rows.insert(row.player_id.clone(), row);

        tracing::debug!(player_id = %player.player_id, "Player saved to memory store");
        Ok(())
    }
}
