use crate::models::QueryOutcome;
use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export formats
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export a query result to a file
pub fn export_result(result: &QueryOutcome, format: ExportFormat, path: &Path) -> Result<String> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Csv => export_to_csv(result, path),
        ExportFormat::Json => export_to_json(result, path),
    }
}

fn table_shape(result: &QueryOutcome) -> (Vec<String>, Vec<Vec<String>>) {
    match result {
        QueryOutcome::Relational(r) => (r.col_names.clone(), r.rows()),
        QueryOutcome::Document(d) => (d.header(), d.rows()),
    }
}

fn export_to_csv(result: &QueryOutcome, path: &Path) -> Result<String> {
    let (columns, rows) = table_shape(result);
    let mut file = File::create(path)?;

    // Write header
    let header = columns.join(",");
    writeln!(file, "{}", header)?;

    // Write rows
    for row in &rows {
        let line = row.join(",");
        writeln!(file, "{}", line)?;
    }

    Ok(path.to_string_lossy().to_string())
}

fn export_to_json(result: &QueryOutcome, path: &Path) -> Result<String> {
    let mut file = File::create(path)?;

    let json = match result {
        // Relational rows become an array of objects keyed by column name
        QueryOutcome::Relational(r) => {
            let mut output = Vec::new();
            for row in &r.result {
                let mut map = serde_json::Map::new();
                for (i, col) in r.col_names.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or(serde_json::Value::Null);
                    map.insert(col.clone(), value);
                }
                output.push(serde_json::Value::Object(map));
            }
            serde_json::to_string_pretty(&output)?
        }
        // Documents are already objects
        QueryOutcome::Document(d) => serde_json::to_string_pretty(&d.documents)?,
    };

    file.write_all(json.as_bytes())?;

    Ok(path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationalResult;

    fn sample_relational() -> QueryOutcome {
        let result: RelationalResult = serde_json::from_str(
            r#"{
                "requirement": "Q",
                "parsed_result": "P",
                "query": "SELECT 1",
                "col_names": ["a", "b"],
                "result": [[1, 2], [3, 4]]
            }"#,
        )
        .unwrap();
        QueryOutcome::Relational(result)
    }

    #[test]
    fn test_csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        export_result(&sample_relational(), ExportFormat::Csv, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("a,b"));
        assert_eq!(lines.next(), Some("1,2"));
        assert_eq!(lines.next(), Some("3,4"));
    }

    #[test]
    fn test_json_export_keys_rows_by_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        export_result(&sample_relational(), ExportFormat::Json, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["a"], 1);
        assert_eq!(parsed[1]["b"], 4);
    }

    #[test]
    fn test_csv_export_document_header_from_first_document() {
        let doc: crate::models::DocumentResult = serde_json::from_str(
            r#"{"data": "D", "documents": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]}"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.csv");

        export_result(&QueryOutcome::Document(doc), ExportFormat::Csv, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some("x,y"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.csv");

        export_result(&sample_relational(), ExportFormat::Csv, &path).unwrap();
        assert!(path.exists());
    }
}
