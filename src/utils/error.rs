//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading log files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read logs directory {0}: {1}")]
    ReadDir(PathBuf, #[source] std::io::Error),
}

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("No log records found")]
    NoRecords,
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
