//! Error types for CLI operations.

use thiserror::Error;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unreadable or malformed transcript.
    #[error("Input error: {0}")]
    Input(String),

    /// Missing stop-word list or other auxiliary resource.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Word-cloud rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// Output serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chatstat_core::Error> for CliError {
    fn from(err: chatstat_core::Error) -> Self {
        use chatstat_core::Error;

        match err {
            Error::Input(msg) => CliError::Input(msg),
            Error::Json(e) => CliError::Input(e.to_string()),
            Error::Io(e) => CliError::Io(e),
            Error::Config(msg) => CliError::Config(msg),
            Error::Resource(msg) => CliError::Resource(msg),
            Error::Rendering(msg) => CliError::Rendering(msg),
        }
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
