//! Natural-language query API

use super::BackendClient;
use crate::models::{DatabaseKind, DocumentResult, QueryOutcome, RelationalResult};
use anyhow::Result;

impl BackendClient {
    /// Run a natural-language query against the backend for `kind`
    ///
    /// The relational endpoint takes an `additional_info` flag asking the
    /// backend for the explanatory fields alongside the rows.
    pub async fn run_query(&self, kind: DatabaseKind, user_input: &str) -> Result<QueryOutcome> {
        match kind {
            DatabaseKind::Postgres => {
                let endpoint = format!(
                    "query?user_input={}&additional_info=true",
                    urlencoding::encode(user_input)
                );
                let result: RelationalResult = self.get_json(&endpoint).await?;
                Ok(QueryOutcome::Relational(result))
            }
            DatabaseKind::Mongo => {
                let endpoint = format!(
                    "mongo_query?user_input={}",
                    urlencoding::encode(user_input)
                );
                let result: DocumentResult = self.get_json(&endpoint).await?;
                Ok(QueryOutcome::Document(result))
            }
        }
    }
}
