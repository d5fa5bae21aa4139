//! Error types for tableviewlib
//!
//! The view engine itself never fails. These errors come from the edges:
//! reading row dumps and table configs from disk, and writing CSV exports.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or exporting table data
#[derive(Error, Debug)]
pub enum TableViewError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content is not valid JSON
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Row dump is not a JSON array
    #[error("expected a JSON array of rows in '{0}'")]
    NotAnArray(PathBuf),

    /// A row in the dump is not a JSON object
    #[error("row {index} in '{path}' is not a JSON object")]
    NotAnObject { path: PathBuf, index: usize },

    /// Config references a field no column declares
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
