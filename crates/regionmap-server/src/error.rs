//! Server error type

use thiserror::Error;

/// Errors surfaced by the file server and the relay
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket protocol failure
    #[error("WebSocket error: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Result alias for server operations
pub type ServerResult<T> = Result<T, ServerError>;
