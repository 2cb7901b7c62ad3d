//! Error types for regionmap-io

use thiserror::Error;

/// Errors that can occur reading or writing pipeline artifacts
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regionmap_core::Error),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Image encode error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported image format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for artifact I/O operations
pub type IoResult<T> = Result<T, IoError>;
