//! PostgreSQL-backed player store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::metrics::QueryTimer;

use super::store::PlayerStore;
use super::types::{validate_player_id, Player, PlayerRow};

const SELECT_PLAYER: &str = r#"
    SELECT player_id, username, xp, level, currency,
           equipped_modules_json, owned_modules_json
    FROM players
    WHERE player_id = $1
"#;

const UPSERT_PLAYER: &str = r#"
    INSERT INTO players (player_id, username, xp, level, currency,
                         equipped_modules_json, owned_modules_json)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (player_id) DO UPDATE SET
        username = EXCLUDED.username,
        xp = EXCLUDED.xp,
        level = EXCLUDED.level,
        currency = EXCLUDED.currency,
        equipped_modules_json = EXCLUDED.equipped_modules_json,
        owned_modules_json = EXCLUDED.owned_modules_json
"#;

/// Player store over the `players` table.
///
/// Each call is one statement on a pooled connection; there is no
/// transaction spanning calls.
pub struct PostgresPlayerStore {
    /// PostgreSQL connection pool
    pool: PgPool,
}

impl PostgresPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PostgresPlayerStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn get_player(&self, player_id: &str) -> Result<Option<Player>> {
        validate_player_id(player_id)?;

        let timer = QueryTimer::start("get_player");
        let row = sqlx::query_as::<_, PlayerRow>(SELECT_PLAYER)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(row) => {
                timer.success();
                tracing::trace!(player_id = %player_id, found = row.is_some(), "Player lookup");
                Ok(row.map(PlayerRow::into_player))
            }
            Err(e) => {
                timer.failure();
                tracing::error!(player_id = %player_id, error = %e, "Error fetching player");
                Err(e.into())
            }
        }
    }

    async fn save_player(&self, player: &Player) -> Result<()> {
        validate_player_id(&player.player_id)?;
        let row = PlayerRow::from_player(player)?;

        let timer = QueryTimer::start("save_player");
        let result = sqlx::query(UPSERT_PLAYER)
            .bind(&row.player_id)
            .bind(&row.username)
            .bind(row.xp)
            .bind(row.level)
            .bind(row.currency)
            .bind(&row.equipped_modules_json)
            .bind(&row.owned_modules_json)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                timer.success();
                tracing::info!(player_id = %player.player_id, "Player saved successfully");
                Ok(())
            }
            Err(e) => {
                timer.failure();
                tracing::error!(
                    player_id = %player.player_id,
                    error = %e,
                    "Error saving player"
                );
                Err(e.into())
            }
        }
    }
}
