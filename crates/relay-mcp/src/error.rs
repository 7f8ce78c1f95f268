//! Error types for the MCP servers

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving the protocol
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the dispatch core, raised while building a server
    #[error("core error: {0}")]
    Core(#[from] relay_core::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the stdio transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
