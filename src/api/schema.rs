//! Schema description API

use super::BackendClient;
use crate::models::{DatabaseKind, SchemaResponse};
use anyhow::Result;
use serde_json::Value as JsonValue;

impl BackendClient {
    /// Fetch the schema description for the given database kind
    pub async fn fetch_schema(&self, kind: DatabaseKind) -> Result<JsonValue> {
        let response: SchemaResponse = self.get_json(kind.schema_endpoint()).await?;
        Ok(response.data)
    }
}
