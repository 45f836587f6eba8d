//! Error types for chatstat core functionality.

use thiserror::Error;

/// Main error type for chatstat.
///
/// Per-message faults never become an `Error`; they are absorbed where the
/// message is read and the message is left out of the computation.
#[derive(Error, Debug)]
pub enum Error {
    /// Transcript missing, unreadable, or not valid structured data.
    #[error("Input error: {0}")]
    Input(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Stop-word list or font resource could not be loaded.
    #[error("Resource error: {0}")]
    Resource(String),
    /// The word-cloud image could not be produced.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

/// Result type for chatstat operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a resource error
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Create a rendering error
    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::Rendering(msg.into())
    }
}

/// Convenience trait for converting errors to core Error type
pub trait IntoCoreError<T> {
    /// Convert to an input error with context
    fn input_context(self, context: &str) -> Result<T>;
}

impl<T, E> IntoCoreError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn input_context(self, context: &str) -> Result<T> {
        self.map_err(|e| Error::Input(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_context_wraps_source_message() {
        let raw: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = raw.input_context("chat.json").unwrap_err();
        assert!(matches!(err, Error::Input(_)));
        assert_eq!(err.to_string(), "Input error: chat.json: no such file");
    }
}
