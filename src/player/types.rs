use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::codec::{self, EQUIPPED_MODULES_COLUMN, OWNED_MODULES_COLUMN};
use crate::error::{DataError, Result};

/// Reference to a catalog module inside a player's collections.
///
/// Usually a bare module id (`"laser-mk1"`) or an object carrying a
/// `module_id` plus per-instance fields (`{"module_id": "laser-mk1",
/// "slot": "left_arm"}`). Any other JSON element is kept as-is in `Other`
/// so that a read-modify-write never drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleRef {
    Id(String),
    Detailed {
        module_id: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Other(Value),
}

impl ModuleRef {
    /// The string module id, if this element has one.
    pub fn module_id(&self) -> Option<&str> {
        match self {
            ModuleRef::Id(id) => Some(id),
            ModuleRef::Detailed { module_id, .. } => Some(module_id),
            ModuleRef::Other(_) => None,
        }
    }

    /// Same module: equal ids, or identical JSON when either side has no id.
    pub fn same_module(&self, other: &ModuleRef) -> bool {
        match (self.module_id(), other.module_id()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl From<&str> for ModuleRef {
    fn from(id: &str) -> Self {
        ModuleRef::Id(id.to_string())
    }
}

impl From<String> for ModuleRef {
    fn from(id: String) -> Self {
        ModuleRef::Id(id)
    }
}

/// A player profile with decoded module collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub username: String,
    pub xp: i64,
    pub level: i32,
    pub currency: i64,
    /// Modules currently fitted to the player's mech
    #[serde(default)]
    pub equipped_modules: Vec<ModuleRef>,
    /// Every module the player has acquired
    #[serde(default)]
    pub owned_modules: Vec<ModuleRef>,
}

impl Player {
    /// A fresh level 1 profile with nothing owned.
    pub fn new(player_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            username: username.into(),
            xp: 0,
            level: 1,
            currency: 0,
            equipped_modules: Vec::new(),
            owned_modules: Vec::new(),
        }
    }

    /// Equipped modules with no matching entry in the owned list.
    ///
    /// Equipped should always be a subset of owned. Nothing here enforces
    /// that; this is for callers that want to check.
    pub fn equipped_not_owned(&self) -> Vec<&ModuleRef> {
        self.equipped_modules
            .iter()
            .filter(|equipped| {
                !self
                    .owned_modules
                    .iter()
                    .any(|owned| owned.same_module(equipped))
            })
            .collect()
    }
}

/// Reject ids that cannot match a row.
pub fn validate_player_id(player_id: &str) -> Result<()> {
    if player_id.is_empty() {
        return Err(DataError::InvalidInput(
            "player_id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// A `players` row as stored, with JSON columns still as text.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PlayerRow {
    pub player_id: String,
    pub username: String,
    pub xp: i64,
    pub level: i32,
    pub currency: i64,
    pub equipped_modules_json: Option<String>,
    pub owned_modules_json: Option<String>,
}

impl PlayerRow {
    /// Serialize a player for storage. Empty collections become `"[]"`.
    pub fn from_player(player: &Player) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self {
            player_id: player.player_id.clone(),
            username: player.username.clone(),
            xp: player.xp,
            level: player.level,
            currency: player.currency,
            equipped_modules_json: Some(codec::encode(&player.equipped_modules)?),
            owned_modules_json: Some(codec::encode(&player.owned_modules)?),
        })
    }

    /// Decode into a [`Player`]. Each JSON column falls back to an empty
    /// list on its own.
    pub fn into_player(self) -> Player {
        let equipped_modules = codec::decode_or_default(
            self.equipped_modules_json.as_deref(),
            &self.player_id,
            EQUIPPED_MODULES_COLUMN,
        );
        let owned_modules = codec::decode_or_default(
            self.owned_modules_json.as_deref(),
            &self.player_id,
            OWNED_MODULES_COLUMN,
        );

        Player {
            player_id: self.player_id,
            username: self.username,
            xp: self.xp,
            level: self.level,
            currency: self.currency,
            equipped_modules,
            owned_modules,
        }
    }
}
