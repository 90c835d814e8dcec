//! Database kind selection

/// Which backend database integration is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseKind {
    #[default]
    Postgres,
    Mongo,
}

impl DatabaseKind {
    /// The other kind, for the toggle
    pub fn toggled(&self) -> Self {
        match self {
            Self::Postgres => Self::Mongo,
            Self::Mongo => Self::Postgres,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::Mongo => "MongoDB",
        }
    }

    /// Schema endpoint for this kind
    pub fn schema_endpoint(&self) -> &'static str {
        match self {
            Self::Postgres => "db_schema",
            Self::Mongo => "mongo_schema",
        }
    }

    /// Visualization endpoint for this kind
    pub fn visualization_endpoint(&self) -> &'static str {
        match self {
            Self::Postgres => "visualization",
            Self::Mongo => "mongo_visualization",
        }
    }
}
