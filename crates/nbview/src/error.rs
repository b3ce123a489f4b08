//! Error types for the viewer pipeline.

use nbview_engine::EngineError;
use thiserror::Error;

/// Result type for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that abort a `process` call.
///
/// Nothing in the pipeline recovers from these; each propagates to the
/// caller as-is.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Transport failure while fetching the notebook.
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    /// Fetched text is not a notebook the engine accepts.
    #[error("parse error: {0}")]
    Parse(#[source] EngineError),

    /// The engine failed to export the notebook.
    #[error("render error: {0}")]
    Render(#[source] EngineError),

    /// A cell processor failed.
    #[error("processor {name} failed: {message}")]
    Processor { name: &'static str, message: String },
}
