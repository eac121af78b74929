//! Error types for the core module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while handling documents and their data.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("Invalid document data in {path}: {message}")]
    InvalidData { path: PathBuf, message: String },

    #[error("Data file not found: {0}")]
    DataNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
