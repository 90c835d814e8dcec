//! Recursive schema tree rendering
//!
//! The backend describes a database schema as an arbitrarily nested mapping
//! of names to descriptions. Each key renders as one labeled line, indented
//! by nesting depth.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde_json::{Map, Value as JsonValue};

/// Placeholder shown for an empty or absent schema
pub const NO_DATA: &str = "No data available";

/// Nesting depth rendered before truncation. Realistic schemas are tens of
/// levels at most; anything deeper is malformed backend data.
const MAX_DEPTH: usize = 32;

/// Build display lines for a schema description
pub fn schema_lines(schema: Option<&JsonValue>) -> Vec<Line<'static>> {
    match schema {
        Some(JsonValue::Object(map)) if !map.is_empty() => {
            let mut lines = Vec::new();
            push_entries(map, 0, &mut lines);
            lines
        }
        _ => vec![placeholder_line(0)],
    }
}

fn push_entries(map: &Map<String, JsonValue>, depth: usize, lines: &mut Vec<Line<'static>>) {
    for (key, value) in map {
        let indent = "  ".repeat(depth);
        match value {
            JsonValue::Object(nested) => {
                lines.push(Line::from(vec![
                    Span::raw(indent),
                    key_span(key),
                ]));
                if nested.is_empty() {
                    lines.push(placeholder_line(depth + 1));
                } else if depth + 1 >= MAX_DEPTH {
                    lines.push(Line::from(format!("{}…", "  ".repeat(depth + 1))));
                } else {
                    push_entries(nested, depth + 1, lines);
                }
            }
            leaf => {
                lines.push(Line::from(vec![
                    Span::raw(indent),
                    key_span(key),
                    Span::raw(" "),
                    Span::raw(leaf_text(leaf)),
                ]));
            }
        }
    }
}

fn key_span(key: &str) -> Span<'static> {
    Span::styled(
        format!("{}:", key),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

fn placeholder_line(depth: usize) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", "  ".repeat(depth), NO_DATA),
        Style::default().fg(Color::DarkGray),
    ))
}

fn leaf_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(schema: &JsonValue) -> Vec<String> {
        schema_lines(Some(schema))
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.clone())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_absent_schema_renders_placeholder() {
        let lines = schema_lines(None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, NO_DATA);
    }

    #[test]
    fn test_empty_schema_renders_placeholder() {
        let lines = schema_lines(Some(&json!({})));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, NO_DATA);
    }

    #[test]
    fn test_one_line_per_key_at_every_level() {
        let schema = json!({
            "orders": "table",
            "users": {
                "id": "integer",
                "name": "text"
            }
        });

        let lines = rendered(&schema);
        // orders, users, users.id, users.name
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "orders: table");
        assert_eq!(lines[1], "users:");
        assert_eq!(lines[2], "  id: integer");
        assert_eq!(lines[3], "  name: text");
    }

    #[test]
    fn test_indentation_tracks_nesting_depth() {
        let schema = json!({"a": {"b": {"c": "leaf"}}});

        let lines = rendered(&schema);
        assert_eq!(lines, vec!["a:", "  b:", "    c: leaf"]);
    }

    #[test]
    fn test_scalar_leaf_types_render_as_text() {
        let schema = json!({"count": 3, "nullable": true, "tags": [1, 2]});

        let lines = rendered(&schema);
        assert_eq!(lines, vec!["count: 3", "nullable: true", "tags: [1,2]"]);
    }

    #[test]
    fn test_empty_nested_mapping_renders_placeholder() {
        let schema = json!({"ghost": {}});

        let lines = rendered(&schema);
        assert_eq!(lines, vec!["ghost:".to_string(), format!("  {}", NO_DATA)]);
    }

    #[test]
    fn test_deep_nesting_is_truncated_not_overflowed() {
        let mut schema = json!("leaf");
        for i in 0..100 {
            let mut map = Map::new();
            map.insert(format!("level{}", i), schema);
            schema = JsonValue::Object(map);
        }

        let lines = rendered(&schema);
        // One label per level up to the cap, then a truncation marker
        assert!(lines.len() <= MAX_DEPTH + 1);
        assert!(lines.last().unwrap().trim_start().starts_with('…'));
    }
}
