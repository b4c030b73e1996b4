//! JSON text column encoding and decoding.
//!
//! Player module lists and module stats are stored as JSON in plain `TEXT`
//! columns. Reading them never fails: a `NULL` or blank column decodes to
//! the empty default silently, and anything that does not decode to the
//! expected shape decodes to the empty default with a warning.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::metrics::DecodeMetrics;

/// Column names, also used as metric labels.
pub const EQUIPPED_MODULES_COLUMN: &str = "equipped_modules_json";
pub const OWNED_MODULES_COLUMN: &str = "owned_modules_json";
pub const STATS_COLUMN: &str = "stats_json";

/// Decode a JSON text column, falling back to `T::default()`.
///
/// `record_id` and `column` only feed the warning and the failure metric.
pub fn decode_or_default<T>(raw: Option<&str>, record_id: &str, column: &'static str) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return T::default(),
    };

    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            DecodeMetrics::record_failure(column);
            tracing::warn!(
                record_id = %record_id,
                column = column,
                error = %e,
                "Error parsing JSON column, using empty default"
            );
            T::default()
        }
    }
}

/// Encode a value for storage in a JSON text column.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
