//! Server configuration
//!
//! Ports, served directory and the PUT filename allow-list. Uploads are
//! fail-closed: only names on the allow-list can be written, everything
//! else is rejected before the body is read.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Default HTTP port for the scene file server
pub const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default WebSocket port for the event relay
pub const DEFAULT_WS_PORT: u16 = 8765;

/// Scene files the performer UI is allowed to save
pub const DEFAULT_ALLOWED_FILES: [&str; 5] = [
    "scene1.json",
    "scene2.json",
    "scene3.json",
    "perform_config.json",
    "config.json",
];

/// Runtime configuration for both services
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// WebSocket relay listen port
    pub ws_port: u16,
    /// Directory served over HTTP and written to by PUT
    pub directory: PathBuf,
    /// Basenames accepted by PUT
    pub allowed_files: BTreeSet<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            ws_port: DEFAULT_WS_PORT,
            directory: PathBuf::from("."),
            allowed_files: DEFAULT_ALLOWED_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Set the HTTP listen port
    pub fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    /// Set the WebSocket listen port
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = port;
        self
    }

    /// Set the served directory
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Check a basename against the PUT allow-list
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed_files.contains(name)
    }
}
