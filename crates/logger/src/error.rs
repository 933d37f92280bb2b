//! Error types for the logging engine

use std::io;
use std::path::PathBuf;

/// Result type for logging engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while constructing or driving sinks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create the directory for a file sink
    #[error("Failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Serialization error
    #[error("Failed to serialize log record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A component rejected its construction parameters
    #[error("Invalid component parameters: {0}")]
    InvalidParams(String),
}
