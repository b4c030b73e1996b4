use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::codec::{self, STATS_COLUMN};

/// A single stat value. Anything that is not a plain scalar (`null`, nested
/// objects, arrays) is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
    Other(Value),
}

impl StatValue {
    /// Numeric view, for integer and float stats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Integer(v) => Some(*v as f64),
            StatValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StatValue::Other(Value::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Stat name to value, ordered by name.
pub type ModuleStats = BTreeMap<String, StatValue>;

/// A catalog entry with decoded stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub module_id: String,
    pub name: String,
    /// Free-form category ("weapon", "armor", "utility", ...)
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub stats: ModuleStats,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
}

impl Module {
    pub fn stat(&self, name: &str) -> Option<&StatValue> {
        self.stats.get(name)
    }
}

/// A `modules` row as stored, with `stats_json` still as text.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ModuleRow {
    pub module_id: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub module_type: String,
    pub stats_json: Option<String>,
    pub description: Option<String>,
    pub cost: i64,
}

impl ModuleRow {
    /// Decode into a [`Module`]. Stats that are not a JSON object become an
    /// empty map.
    pub fn into_module(self) -> Module {
        let stats = codec::decode_or_default(
            self.stats_json.as_deref(),
            &self.module_id,
            STATS_COLUMN,
        );

        Module {
            module_id: self.module_id,
            name: self.name,
            module_type: self.module_type,
            stats,
            description: self.description.unwrap_or_default(),
            cost: self.cost,
        }
    }
}
