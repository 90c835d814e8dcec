//! Query result models
//!
//! The backend returns a different shape per database kind, so the result is
//! an explicit tagged union rather than a single open-ended value.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// Result of a natural-language query against the relational backend
#[derive(Debug, Clone, Deserialize)]
pub struct RelationalResult {
    /// The requirement as the backend understood it
    pub requirement: Option<String>,

    /// Intermediate parse of the requirement
    pub parsed_result: Option<String>,

    /// Generated SQL
    pub query: Option<String>,

    /// Column headers, in result order
    #[serde(default)]
    pub col_names: Vec<String>,

    /// Rows, each aligned positionally with `col_names`
    #[serde(default)]
    pub result: Vec<Vec<JsonValue>>,
}

/// Result of a natural-language query against the document backend
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResult {
    /// Summary text returned alongside the documents
    pub data: Option<String>,

    #[serde(default)]
    pub documents: Vec<Map<String, JsonValue>>,
}

/// Query result, one case per database kind
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Relational(RelationalResult),
    Document(DocumentResult),
}

impl RelationalResult {
    /// Body rows as display strings, positionally aligned with `col_names`
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.result
            .iter()
            .map(|row| row.iter().map(format_json_value).collect())
            .collect()
    }
}

impl DocumentResult {
    /// Table header: the first document's key set
    pub fn header(&self) -> Vec<String> {
        self.documents
            .first()
            .map(|doc| doc.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Body rows: each document's own values. Documents whose key set
    /// differs from the first render misaligned cells (known limitation).
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.documents
            .iter()
            .map(|doc| doc.values().map(format_json_value).collect())
            .collect()
    }
}

/// Format a JSON value for display
fn format_json_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "-".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(arr) => format!("[{} items]", arr.len()),
        JsonValue::Object(_) => "{...}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relational_result_deserialization() {
        let json = r#"
        {
            "requirement": "Q",
            "parsed_result": "P",
            "query": "SELECT 1",
            "col_names": ["a", "b"],
            "result": [[1, 2], [3, 4]]
        }
        "#;

        let result: RelationalResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.requirement.as_deref(), Some("Q"));
        assert_eq!(result.parsed_result.as_deref(), Some("P"));
        assert_eq!(result.query.as_deref(), Some("SELECT 1"));
        assert_eq!(result.col_names, vec!["a", "b"]);
        assert_eq!(
            result.rows(),
            vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string(), "4".to_string()]]
        );
    }

    #[test]
    fn test_relational_result_missing_table_fields() {
        let json = r#"{"requirement": "Q", "parsed_result": "P", "query": "SELECT 1"}"#;
        let result: RelationalResult = serde_json::from_str(json).unwrap();

        assert!(result.col_names.is_empty());
        assert!(result.rows().is_empty());
    }

    #[test]
    fn test_document_result_header_from_first_document() {
        let json = r#"
        {
            "data": "D",
            "documents": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]
        }
        "#;

        let result: DocumentResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.data.as_deref(), Some("D"));
        assert_eq!(result.header(), vec!["x", "y"]);
        assert_eq!(
            result.rows(),
            vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string(), "4".to_string()]]
        );
    }

    #[test]
    fn test_document_result_empty_documents() {
        let json = r#"{"data": "D", "documents": []}"#;
        let result: DocumentResult = serde_json::from_str(json).unwrap();

        assert!(result.header().is_empty());
        assert!(result.rows().is_empty());
    }

    #[test]
    fn test_format_json_value() {
        assert_eq!(format_json_value(&JsonValue::Null), "-");
        assert_eq!(format_json_value(&serde_json::json!(true)), "true");
        assert_eq!(format_json_value(&serde_json::json!(42)), "42");
        assert_eq!(format_json_value(&serde_json::json!("text")), "text");
        assert_eq!(format_json_value(&serde_json::json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_json_value(&serde_json::json!({"k": 1})), "{...}");
    }
}
