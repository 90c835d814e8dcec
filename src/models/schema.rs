//! Schema description envelope

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Response wrapper for the schema endpoints
///
/// The payload is an arbitrarily nested mapping of table/collection and
/// field names to descriptions; no fixed shape is enforced.
#[derive(Debug, Deserialize)]
pub struct SchemaResponse {
    pub data: JsonValue,
}
