//! Error types for the Aletheia library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Aletheia operations.
///
/// Validation failures are not errors: they are reported as
/// [`ValidationOutcome`](crate::ValidationOutcome) and
/// [`ValidationSummary`](crate::ValidationSummary) values.
#[derive(Debug, Error)]
pub enum AletheiaError {
    /// An operation that needs a current item was called with none selected.
    #[error("No item selected")]
    NoActiveItem,

    /// No item with the given id exists in the session.
    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    /// The current item is already completed or skipped.
    #[error("Item '{0}' is already decided")]
    AlreadyDecided(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a line of a JSONL item file.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Two items in one collection share an id.
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Aletheia operations.
pub type Result<T> = std::result::Result<T, AletheiaError>;
