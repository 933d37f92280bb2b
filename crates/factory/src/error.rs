//! Error types for the channel factory

use loghub_logger::ParseLevelError;
use std::convert::Infallible;

/// Result type for factory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried as the underlying cause of a construction failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The requested type name has no registered constructor
#[derive(Debug, thiserror::Error)]
#[error("no constructor registered for this type name")]
pub(crate) struct UnregisteredType;

/// Errors that can occur while building channels or logging through them
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration violates a construction invariant
    #[error("Invalid logging configuration: {0}")]
    InvalidConfiguration(String),

    /// A handler (sink) could not be constructed
    #[error("Failed to construct handler `{name}`: {source}")]
    HandlerConstruction {
        /// The requested sink type name
        name: String,
        /// The underlying cause
        source: BoxError,
    },

    /// A formatter could not be constructed
    #[error("Failed to construct formatter `{name}`: {source}")]
    FormatterConstruction {
        /// The requested formatter type name
        name: String,
        /// The underlying cause
        source: BoxError,
    },

    /// A processor could not be constructed
    #[error("Failed to construct processor `{name}`: {source}")]
    ProcessorConstruction {
        /// The requested processor type name
        name: String,
        /// The underlying cause
        source: BoxError,
    },

    /// Lookup or selection of a channel name that is not registered
    #[error("Unknown logging channel: {0}")]
    ChannelNotFound(String),

    /// An unrecognized severity was passed to the generic log entry point
    #[error("Invalid log level: {0}")]
    InvalidLevel(#[from] ParseLevelError),

    /// A sink failed while delivering a record; passed through unchanged
    #[error(transparent)]
    Engine(#[from] loghub_logger::Error),
}

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
