//! nlidb - a terminal client for natural-language database queries
//!
//! Type a request in plain language and the backend translates it into a
//! database query for the selected engine, returning:
//! - The generated query and its result rows (PostgreSQL or MongoDB)
//! - The database schema, shown as a recursive tree
//! - Rendered chart images for visualization requests

mod api;
mod config;
mod export;
mod models;
mod ui;
mod viz;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::BackendClient;
use crate::config::Config;
use crate::export::ExportFormat;
use crate::ui::{ApiEvent, App, Field, InputMode, KeyBindings};

/// nlidb - natural language interface for databases
#[derive(Parser, Debug)]
#[command(name = "nlidb")]
#[command(about = "A terminal UI for querying databases in natural language")]
#[command(version)]
struct Args {
    /// Backend service URL (e.g. http://localhost:8000)
    #[arg(short, long, env = "BACKEND_URL")]
    backend: Option<String>,

    /// Use vim-style keybindings (j/k navigation)
    #[arg(long, default_value = "false")]
    vim: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (for debugging, set RUST_LOG=debug)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    // Resolve the backend URL: flag/env first, then the last one used
    let mut config = Config::load().unwrap_or_default();
    let backend = args
        .backend
        .or_else(|| config.current_backend.clone())
        .context("No backend URL. Pass --backend or set BACKEND_URL")?;
    config.add_backend(backend.clone());
    if let Err(e) = config.save() {
        tracing::warn!("Could not save config: {}", e);
    }

    let client = Arc::new(BackendClient::new(&backend));

    // Set up key bindings
    let key_bindings = if args.vim {
        KeyBindings::Vim
    } else {
        KeyBindings::Arrows
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Create app and run
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, key_bindings, events_tx);
    let result = run_app(&mut terminal, &mut app, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {:?}", e);
    }

    Ok(())
}

/// Main event loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut events_rx: mpsc::UnboundedReceiver<ApiEvent>,
) -> Result<()> {
    // Initial schema load for the default kind (PostgreSQL)
    app.request_schema();

    loop {
        // Apply results of requests that completed since the last pass
        while let Ok(api_event) = events_rx.try_recv() {
            app.apply_event(api_event);
        }

        // Render
        terminal.draw(|f| ui::components::render(f, app))?;

        // Handle events with timeout
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.input_mode {
                    InputMode::Normal => handle_normal_mode(app, key.code),
                    InputMode::Editing => handle_editing_mode(app, key.code),
                }

                if app.should_quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle input in normal mode
fn handle_normal_mode(app: &mut App, key: KeyCode) {
    // Any keypress dismisses the feedback message
    app.clear_message();

    // Global shortcuts
    match key {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_kind();
            return;
        }
        KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
            return;
        }
        KeyCode::Char('e') => {
            app.export_query_result(ExportFormat::Csv);
            return;
        }
        KeyCode::Char('x') => {
            app.export_query_result(ExportFormat::Json);
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Enter => {
            run_focused_action(app);
            return;
        }
        _ => {}
    }

    // Navigation between fields
    if app.key_bindings.is_down(key) {
        app.focus = app.focus.next();
    } else if app.key_bindings.is_up(key) {
        app.focus = app.focus.prev();
    }
}

/// Handle input while editing a text field
fn handle_editing_mode(app: &mut App, key: KeyCode) {
    app.clear_message();

    match key {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            run_focused_action(app);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.field_value_mut(app.focus).pop();
        }
        KeyCode::Char(c) => {
            app.field_value_mut(app.focus).push(c);
        }
        _ => {}
    }
}

/// Dispatch the action belonging to the focused field: the query input runs
/// a query, the visualization inputs fetch a graph
fn run_focused_action(app: &mut App) {
    match app.focus {
        Field::Query => app.submit_query(),
        Field::VizData | Field::VizType | Field::VizRepresentation => {
            app.request_visualization()
        }
    }
}
