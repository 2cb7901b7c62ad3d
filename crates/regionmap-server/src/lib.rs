//! regionmap-server - collaborator services for the performance tools
//!
//! Two services in one binary:
//!
//! - an HTTP scene file server with an allow-listed PUT endpoint and
//!   permissive CORS, so the performer UI can save scene files
//! - a WebSocket relay broadcasting events between the performer and
//!   display pages

pub mod config;
pub mod error;
pub mod http;
pub mod relay;

pub use config::{DEFAULT_ALLOWED_FILES, DEFAULT_HTTP_PORT, DEFAULT_WS_PORT, ServerConfig};
pub use error::{ServerError, ServerResult};
