//! Input handling and key bindings

use crossterm::event::KeyCode;

/// Whether vim-style keybindings are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBindings {
    /// Arrow keys for navigation (default)
    Arrows,
    /// Vim-style j/k navigation
    Vim,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::Arrows
    }
}

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Editing the focused text field
    Editing,
}

/// Focusable text input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Natural-language query input
    #[default]
    Query,
    /// Visualization: what data is required
    VizData,
    /// Visualization: what type of graph is needed
    VizType,
    /// Visualization: what the graph represents
    VizRepresentation,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Self::Query => Self::VizData,
            Self::VizData => Self::VizType,
            Self::VizType => Self::VizRepresentation,
            Self::VizRepresentation => Self::Query,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Query => Self::VizRepresentation,
            Self::VizData => Self::Query,
            Self::VizType => Self::VizData,
            Self::VizRepresentation => Self::VizType,
        }
    }
}

impl KeyBindings {
    /// Check if this key code moves up
    pub fn is_up(&self, key: KeyCode) -> bool {
        match (self, key) {
            (_, KeyCode::Up) => true,
            (Self::Vim, KeyCode::Char('k')) => true,
            _ => false,
        }
    }

    /// Check if this key code moves down
    pub fn is_down(&self, key: KeyCode) -> bool {
        match (self, key) {
            (_, KeyCode::Down) => true,
            (Self::Vim, KeyCode::Char('j')) => true,
            _ => false,
        }
    }
}
