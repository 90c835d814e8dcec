//! Data models for backend responses

mod kind;
mod query;
mod schema;

pub use kind::DatabaseKind;
pub use query::{DocumentResult, QueryOutcome, RelationalResult};
pub use schema::SchemaResponse;
