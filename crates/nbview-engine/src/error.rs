//! Error types for the notebook engine.

use std::path::PathBuf;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while parsing or exporting a notebook.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Failed to read a notebook file.
    #[error("Failed to read file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// Document is not a well-formed notebook.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Notebook uses a format version other than 4.
    #[error("Unsupported nbformat version {0} (expected 4)")]
    UnsupportedVersion(u64),

    /// Failed to serialize/deserialize JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Cell content could not be rendered.
    #[error("Render error: {0}")]
    RenderError(String),
}
