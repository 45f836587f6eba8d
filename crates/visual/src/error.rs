use thiserror::Error;

/// Errors that can occur while rendering a word cloud.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The font resource could not be loaded.
    #[error("Font error: {0}")]
    Font(String),
    /// The corpus holds no drawable words.
    #[error("Nothing to render: corpus has no words")]
    EmptyText,
    /// No word fit on the canvas.
    #[error("No word fits on a {0}x{1} canvas")]
    NoRoom(u32, u32),
    /// Invalid render options.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// Image encoding error.
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl From<RenderError> for chatstat_core::Error {
    fn from(err: RenderError) -> Self {
        chatstat_core::Error::rendering(err.to_string())
    }
}
