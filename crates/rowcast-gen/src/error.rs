//! Error types for the generator.

use std::path::PathBuf;

/// Errors that can occur while reading, materializing or rendering a schema.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// IO error on a specific file or directory.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The schema directory does not exist.
    #[error("Schema directory not found: {0}")]
    SchemaDirNotFound(PathBuf),

    /// The snapshot database file does not exist.
    #[error("Schema snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    /// Database error while materializing or introspecting.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to parse the generator configuration.
    #[error("Invalid generator config: {0}")]
    Config(#[from] serde_json::Error),

    /// A type hint names no known host type.
    #[error("Invalid type hint '{hint}' for '{key}'")]
    InvalidTypeHint {
        /// `Table.column` key.
        key: String,
        /// The hint as written.
        hint: String,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
