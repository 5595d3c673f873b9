//! Error types for the flag drawing page

use thiserror::Error;

/// Result type alias for page and client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the page
#[derive(Error, Debug)]
pub enum Error {
    /// The operation needs the drawing surface, which only exists after the
    /// selector has been activated
    #[error("Drawing surface is not available until the selector is activated")]
    NotDrawing,

    /// Brush-size input that cannot be read as a number
    #[error("Invalid brush size: {0:?}")]
    InvalidBrushSize(String),

    /// Palette entry that does not exist
    #[error("Unknown palette color: {0:?}")]
    UnknownColor(String),

    /// Failed to encode the raster
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// Transport-level failure talking to the inference endpoint
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The inference endpoint answered with something we cannot use
    #[error("Unexpected response: {0}")]
    ResponseError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Malformed gesture script
    #[error("Gesture script error: {0}")]
    ScriptError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ScriptError(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
