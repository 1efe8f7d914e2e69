//! Error types.
//!
//! Nothing here is fatal to a batch: the generator reports each unit's error
//! and moves on to the next unit.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Schema introspection failures. `TableNotFound` / `ColumnNotFound` are
/// distinguishable from a generic introspection error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("table not found: {table}")]
    TableNotFound { table: String },

    #[error("column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },

    #[error("schema introspection failed: {message}")]
    Introspection { message: String },
}

#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Source not found: skip the unit
    // ========================================================================
    #[error("{kind} not found: {name}")]
    SourceNotFound { kind: SourceKind, name: String },

    // ========================================================================
    // Generation failures: skip the unit
    // ========================================================================
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {}: {detail}", path.display())]
    Malformed { path: PathBuf, detail: String },

    #[error("unsupported payload in {origin}: {reason}")]
    UnsupportedPayload { origin: String, reason: String },

    #[error("jq filter failed: {0}")]
    Jq(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// What kind of unit could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Model,
    Table,
    Payload,
    Directory,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Table => "table",
            Self::Payload => "payload",
            Self::Directory => "directory",
        })
    }
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn not_found(kind: SourceKind, name: impl Into<String>) -> Self {
        Self::SourceNotFound { kind, name: name.into() }
    }

    /// True for errors that mean "skip this unit" rather than "this unit broke".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::Schema(SchemaError::TableNotFound { .. })
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
