//! UI rendering components

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::App;
use super::input::{Field, InputMode};
use super::schema_tree;
use crate::models::{DatabaseKind, DocumentResult, QueryOutcome, RelationalResult};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if let Some(message) = &app.message {
        render_toast(frame, message);
    }
}

/// Render the header with the database kind toggle
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let kind_span = |kind: DatabaseKind| {
        if app.kind == kind {
            Span::styled(
                kind.label(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(kind.label(), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        kind_span(DatabaseKind::Postgres),
        Span::raw(" ⇄ "),
        kind_span(DatabaseKind::Mongo),
        Span::styled("   t: switch", Style::default().fg(Color::DarkGray)),
    ]);

    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" nlidb "));
    frame.render_widget(header, area);
}

/// Render the main content area
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_query_side(frame, app, chunks[0]);
    render_visualization_side(frame, app, chunks[1]);
}

/// Render the schema, query input, and result column
fn render_query_side(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Schema tree
            Constraint::Length(3),      // Query input
            Constraint::Min(0),         // Query result
        ])
        .split(area);

    render_schema(frame, app, chunks[0]);
    render_input_field(frame, app, chunks[1], Field::Query, " Input your query ");
    render_query_result(frame, app, chunks[2]);
}

/// Render the schema description tree
fn render_schema(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.fetching_schema {
        format!(" Database Schema ({}) — fetching... ", app.kind.label())
    } else {
        format!(" Database Schema ({}) ", app.kind.label())
    };

    let paragraph = Paragraph::new(schema_tree::schema_lines(app.schema.as_ref()))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render one editable text field
fn render_input_field(frame: &mut Frame, app: &App, area: Rect, field: Field, title: &str) {
    let focused = app.focus == field;
    let editing = focused && app.input_mode == InputMode::Editing;

    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let value = app.field_value(field);
    let input = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((area.x + value.len() as u16 + 1, area.y + 1));
    }
}

/// Render the query result section for whichever kind produced it
fn render_query_result(frame: &mut Frame, app: &App, area: Rect) {
    match &app.query_result {
        Some(QueryOutcome::Relational(result)) => {
            render_relational_result(frame, result, area)
        }
        Some(QueryOutcome::Document(result)) => render_document_result(frame, result, area),
        None => {
            let text = if app.running_query {
                Span::styled("Processing Results...", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("", Style::default())
            };
            let placeholder = Paragraph::new(Line::from(text))
                .block(Block::default().borders(Borders::ALL).title(" Query Result "));
            frame.render_widget(placeholder, area);
        }
    }
}

/// Render the relational result: explanatory fields, then the row table
fn render_relational_result(frame: &mut Frame, result: &RelationalResult, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // requirement / parsed_result / query
            Constraint::Min(0),    // rows
        ])
        .split(area);

    let label = |name: &str| {
        Span::styled(
            format!("{}: ", name),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };
    let info = vec![
        Line::from(vec![
            label("requirement"),
            Span::raw(result.requirement.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            label("parsed_result"),
            Span::raw(result.parsed_result.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            label("query"),
            Span::raw(result.query.clone().unwrap_or_else(|| "-".to_string())),
        ]),
    ];

    let details = Paragraph::new(info)
        .block(Block::default().borders(Borders::ALL).title(" Query Result "))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, chunks[0]);

    render_result_table(
        frame,
        &result.col_names,
        result.rows(),
        " Results ",
        chunks[1],
    );
}

/// Render the document result: the data field, then the document table
fn render_document_result(frame: &mut Frame, result: &DocumentResult, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // data
            Constraint::Min(0),    // documents
        ])
        .split(area);

    let info = Line::from(vec![
        Span::styled("Data: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(result.data.clone().unwrap_or_else(|| "-".to_string())),
    ]);
    let details = Paragraph::new(info)
        .block(Block::default().borders(Borders::ALL).title(" Query Result "))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, chunks[0]);

    // Only rendered when documents came back; the header is the first
    // document's key set.
    if !result.documents.is_empty() {
        render_result_table(frame, &result.header(), result.rows(), " Results ", chunks[1]);
    }
}

/// Render a generic result table with the given header and rows
fn render_result_table(
    frame: &mut Frame,
    columns: &[String],
    rows: Vec<Vec<String>>,
    title: &str,
    area: Rect,
) {
    let width = columns.len().max(rows.first().map_or(0, Vec::len));
    if width == 0 {
        let empty = Paragraph::new(Span::styled("No rows", Style::default().fg(Color::DarkGray)))
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(columns.to_vec())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let body: Vec<Row> = rows.into_iter().map(Row::new).collect();

    let widths = vec![Constraint::Ratio(1, width as u32); width];
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(table, area);
}

/// Render the visualization column: three inputs and the chart status
fn render_visualization_side(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // data
            Constraint::Length(3), // chart type
            Constraint::Length(3), // representation
            Constraint::Min(0),    // chart status
        ])
        .split(area);

    render_input_field(frame, app, chunks[0], Field::VizData, " What is the required data? ");
    render_input_field(
        frame,
        app,
        chunks[1],
        Field::VizType,
        " What is the type of graph needed? ",
    );
    render_input_field(
        frame,
        app,
        chunks[2],
        Field::VizRepresentation,
        " What does the graph represent? ",
    );
    render_chart_status(frame, app, chunks[3]);
}

/// Render the current chart image reference
fn render_chart_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = if app.fetching_visualization {
        vec![Line::from(Span::styled(
            "Fetching Graph...",
            Style::default().fg(Color::Yellow),
        ))]
    } else if let Some(image) = &app.visualization {
        vec![
            Line::from(format!("Saved to {}", image.path().display())),
            Line::from(format!("{} bytes", image.size())),
            Line::from(""),
            Line::from(Span::styled(
                "Open the file with your image viewer",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(Span::styled(
            "No chart fetched yet",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Visualization ")
                .title_bottom(" Enter on a field above: Fetch Graph "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" ● {} ", app.kind.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("│ {} ", app.client.base_url())),
    ];

    for (busy, label) in [
        (app.fetching_schema, "schema"),
        (app.running_query, "query"),
        (app.fetching_visualization, "graph"),
    ] {
        if busy {
            spans.push(Span::styled(
                format!("│ {}... ", label),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    spans.push(Span::styled(
        "│ q: Quit │ t: Switch DB │ Tab/↑↓: Focus │ i: Edit │ Enter: Run │ e: CSV │ x: JSON ",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Render the transient feedback message
fn render_toast(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 3, frame.area());

    frame.render_widget(Clear, area);

    let toast = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Info (any key to dismiss) ")
                .style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(toast, area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
