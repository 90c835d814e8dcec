//! Application state and request orchestration

use crate::api::BackendClient;
use crate::export::ExportFormat;
use crate::models::{DatabaseKind, QueryOutcome};
use crate::viz::VisualizationImage;
use super::input::{Field, InputMode, KeyBindings};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Completion events delivered back to the event loop by request tasks
///
/// Every event carries the epoch its request was dispatched under; the app
/// discards events whose epoch is no longer current, so a response that was
/// in flight when the database kind changed can never overwrite newer state.
#[derive(Debug)]
pub enum ApiEvent {
    SchemaLoaded { epoch: u64, schema: JsonValue },
    SchemaFailed { epoch: u64, error: String },
    QueryFinished { epoch: u64, outcome: QueryOutcome },
    QueryFailed { epoch: u64, error: String },
    VisualizationReady { epoch: u64, image: VisualizationImage },
    VisualizationFailed { epoch: u64, error: String },
}

/// Main application struct
pub struct App {
    /// Backend API client
    pub client: Arc<BackendClient>,

    /// Active database kind
    pub kind: DatabaseKind,

    /// Schema description for the active kind
    pub schema: Option<JsonValue>,

    /// Latest query result
    pub query_result: Option<QueryOutcome>,

    /// Latest chart image
    pub visualization: Option<VisualizationImage>,

    // Busy flags, one per asynchronous operation
    pub fetching_schema: bool,
    pub running_query: bool,
    pub fetching_visualization: bool,

    /// Key binding style
    pub key_bindings: KeyBindings,

    /// Input mode
    pub input_mode: InputMode,

    /// Which text field has focus
    pub focus: Field,

    // Text field contents
    pub query_input: String,
    pub viz_data_input: String,
    pub viz_type_input: String,
    pub viz_representation_input: String,

    /// Transient feedback message, cleared on the next keypress
    pub message: Option<String>,

    /// Should quit
    pub should_quit: bool,

    // Dispatch epochs; completion events carrying an older epoch are stale
    pub schema_epoch: u64,
    pub query_epoch: u64,
    pub viz_epoch: u64,

    events_tx: mpsc::UnboundedSender<ApiEvent>,
}

impl App {
    /// Create a new app instance
    pub fn new(
        client: Arc<BackendClient>,
        key_bindings: KeyBindings,
        events_tx: mpsc::UnboundedSender<ApiEvent>,
    ) -> Self {
        Self {
            client,
            kind: DatabaseKind::Postgres,
            schema: None,
            query_result: None,
            visualization: None,
            fetching_schema: false,
            running_query: false,
            fetching_visualization: false,
            key_bindings,
            input_mode: InputMode::Normal,
            focus: Field::Query,
            query_input: String::new(),
            viz_data_input: String::new(),
            viz_type_input: String::new(),
            viz_representation_input: String::new(),
            message: None,
            should_quit: false,
            schema_epoch: 0,
            query_epoch: 0,
            viz_epoch: 0,
            events_tx,
        }
    }

    /// Current contents of a text field
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Query => &self.query_input,
            Field::VizData => &self.viz_data_input,
            Field::VizType => &self.viz_type_input,
            Field::VizRepresentation => &self.viz_representation_input,
        }
    }

    /// Mutable contents of a text field (for editing mode)
    pub fn field_value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Query => &mut self.query_input,
            Field::VizData => &mut self.viz_data_input,
            Field::VizType => &mut self.viz_type_input,
            Field::VizRepresentation => &mut self.viz_representation_input,
        }
    }

    /// Fetch the schema for the active kind
    pub fn request_schema(&mut self) {
        self.fetching_schema = true;
        self.schema_epoch += 1;

        let epoch = self.schema_epoch;
        let kind = self.kind;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            match client.fetch_schema(kind).await {
                Ok(schema) => {
                    let _ = tx.send(ApiEvent::SchemaLoaded { epoch, schema });
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::SchemaFailed {
                        epoch,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Switch the active database kind
    ///
    /// Always clears the query result, sets the new kind, and fetches the
    /// new kind's schema, in that order.
    pub fn toggle_kind(&mut self) {
        self.query_result = None;
        self.kind = self.kind.toggled();
        self.request_schema();
    }

    /// Run the query input against the backend for the active kind
    ///
    /// Empty input after trimming is a silent no-op; the busy flag is still
    /// reset so the UI never sticks in a processing state.
    pub fn submit_query(&mut self) {
        self.query_result = None;
        self.running_query = true;

        let input = self.query_input.trim().to_string();
        if input.is_empty() {
            self.running_query = false;
            return;
        }

        self.query_epoch += 1;

        let epoch = self.query_epoch;
        let kind = self.kind;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            match client.run_query(kind, &input).await {
                Ok(outcome) => {
                    let _ = tx.send(ApiEvent::QueryFinished { epoch, outcome });
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::QueryFailed {
                        epoch,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Request a rendered chart from the backend for the active kind
    ///
    /// All three fields are required after trimming; missing input is a
    /// silent no-op that still resets the busy flag.
    pub fn request_visualization(&mut self) {
        self.fetching_visualization = true;

        let data = self.viz_data_input.trim().to_string();
        let chart_type = self.viz_type_input.trim().to_string();
        let representation = self.viz_representation_input.trim().to_string();

        if data.is_empty() || chart_type.is_empty() || representation.is_empty() {
            self.fetching_visualization = false;
            return;
        }

        self.viz_epoch += 1;

        let epoch = self.viz_epoch;
        let kind = self.kind;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = async {
                let bytes = client
                    .fetch_visualization(kind, &data, &chart_type, &representation)
                    .await?;
                VisualizationImage::write(&VisualizationImage::default_dir(), epoch, &bytes)
            }
            .await;

            match result {
                Ok(image) => {
                    let _ = tx.send(ApiEvent::VisualizationReady { epoch, image });
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::VisualizationFailed {
                        epoch,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Apply a completed request's result to the UI state
    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SchemaLoaded { epoch, schema } => {
                if epoch != self.schema_epoch {
                    tracing::debug!("Discarding stale schema response (epoch {})", epoch);
                    return;
                }
                self.schema = Some(schema);
                self.fetching_schema = false;
            }
            ApiEvent::SchemaFailed { epoch, error } => {
                tracing::error!("Schema fetch failed: {}", error);
                if epoch == self.schema_epoch {
                    self.fetching_schema = false;
                }
            }
            ApiEvent::QueryFinished { epoch, outcome } => {
                if epoch != self.query_epoch {
                    tracing::debug!("Discarding stale query response (epoch {})", epoch);
                    return;
                }
                if matches!(outcome, QueryOutcome::Relational(_)) {
                    self.message =
                        Some("Update the query with additional information for more precision".to_string());
                }
                self.query_result = Some(outcome);
                self.running_query = false;
            }
            ApiEvent::QueryFailed { epoch, error } => {
                tracing::error!("Query failed: {}", error);
                if epoch == self.query_epoch {
                    self.running_query = false;
                }
            }
            ApiEvent::VisualizationReady { epoch, image } => {
                if epoch != self.viz_epoch {
                    // Stale image; dropping the handle removes its file
                    tracing::debug!("Discarding stale visualization (epoch {})", epoch);
                    return;
                }
                // Replacing the handle releases the previous image file
                self.visualization = Some(image);
                self.fetching_visualization = false;
            }
            ApiEvent::VisualizationFailed { epoch, error } => {
                tracing::error!("Visualization fetch failed: {}", error);
                if epoch == self.viz_epoch {
                    self.fetching_visualization = false;
                }
            }
        }
    }

    /// Export the current query result
    pub fn export_query_result(&mut self, format: ExportFormat) {
        let Some(result) = &self.query_result else {
            self.message = Some("No results to export".to_string());
            return;
        };

        let ext = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.{}", self.kind.label().to_lowercase(), timestamp, ext);
        let path_str = format!("exports/{}", filename);
        let path = std::path::Path::new(&path_str);

        match crate::export::export_result(result, format, path) {
            Ok(p) => self.message = Some(format!("Exported to {}", p)),
            Err(e) => self.message = Some(format!("Export failed: {}", e)),
        }
    }

    /// Clear the feedback message
    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationalResult;

    fn test_app() -> (App, mpsc::UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = Arc::new(BackendClient::new("http://127.0.0.1:1"));
        (App::new(client, KeyBindings::Arrows, tx), rx)
    }

    fn relational_outcome() -> QueryOutcome {
        let result: RelationalResult = serde_json::from_str(
            r#"{"requirement": "Q", "parsed_result": "P", "query": "SELECT 1",
                "col_names": ["a"], "result": [[1]]}"#,
        )
        .unwrap();
        QueryOutcome::Relational(result)
    }

    #[test]
    fn test_empty_query_is_a_silent_noop() {
        let (mut app, mut rx) = test_app();
        app.query_input = "   ".to_string();

        app.submit_query();

        assert!(!app.running_query);
        assert!(app.query_result.is_none());
        assert_eq!(app.query_epoch, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_visualization_input_is_a_silent_noop() {
        let (mut app, mut rx) = test_app();
        app.viz_data_input = "sales".to_string();
        app.viz_type_input = String::new();
        app.viz_representation_input = "by region".to_string();

        app.request_visualization();

        assert!(!app.fetching_visualization);
        assert_eq!(app.viz_epoch, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_submit_query_clears_previous_result() {
        let (mut app, _rx) = test_app();
        app.query_result = Some(relational_outcome());
        app.query_input = "show users".to_string();

        app.submit_query();

        assert!(app.query_result.is_none());
        assert!(app.running_query);
        assert_eq!(app.query_epoch, 1);
    }

    #[tokio::test]
    async fn test_toggle_kind_clears_result_and_refetches_schema() {
        let (mut app, _rx) = test_app();
        app.query_result = Some(relational_outcome());

        app.toggle_kind();

        assert_eq!(app.kind, DatabaseKind::Mongo);
        assert!(app.query_result.is_none());
        assert!(app.fetching_schema);
        assert_eq!(app.schema_epoch, 1);

        app.toggle_kind();
        assert_eq!(app.kind, DatabaseKind::Postgres);
        assert_eq!(app.schema_epoch, 2);
    }

    #[test]
    fn test_stale_query_completion_is_discarded() {
        let (mut app, _rx) = test_app();
        app.query_epoch = 2;
        app.running_query = true;

        app.apply_event(ApiEvent::QueryFinished {
            epoch: 1,
            outcome: relational_outcome(),
        });

        assert!(app.query_result.is_none());
        assert!(app.running_query);
    }

    #[test]
    fn test_current_query_completion_is_applied() {
        let (mut app, _rx) = test_app();
        app.query_epoch = 1;
        app.running_query = true;

        app.apply_event(ApiEvent::QueryFinished {
            epoch: 1,
            outcome: relational_outcome(),
        });

        assert!(app.query_result.is_some());
        assert!(!app.running_query);
        // Relational success raises the one-shot refinement notice
        assert!(app.message.is_some());
    }

    #[test]
    fn test_query_failure_leaves_result_absent() {
        let (mut app, _rx) = test_app();
        app.query_epoch = 1;
        app.running_query = true;

        app.apply_event(ApiEvent::QueryFailed {
            epoch: 1,
            error: "connection refused".to_string(),
        });

        assert!(app.query_result.is_none());
        assert!(!app.running_query);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_stale_schema_completion_is_discarded() {
        let (mut app, _rx) = test_app();
        app.schema_epoch = 3;
        app.fetching_schema = true;
        app.schema = Some(serde_json::json!({"users": "table"}));

        app.apply_event(ApiEvent::SchemaLoaded {
            epoch: 2,
            schema: serde_json::json!({"stale": "data"}),
        });

        assert_eq!(app.schema, Some(serde_json::json!({"users": "table"})));
        assert!(app.fetching_schema);
    }
}
