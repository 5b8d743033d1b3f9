//! Error type for the import utility.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while importing tool exports.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A file or directory could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file was not valid JSON.
    #[error("could not parse {} as JSON: {source}", .path.display())]
    Json {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The document parsed but matches none of the recognized shapes.
    #[error("unrecognized export shape: {0}")]
    UnrecognizedShape(String),

    /// A tool payload was found but lacks required fields.
    #[error("tool payload is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The database rejected an operation.
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}
