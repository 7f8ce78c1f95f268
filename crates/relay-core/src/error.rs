//! Error types for relay-core

use std::path::PathBuf;

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating, routing or executing a tool call.
///
/// The `Display` text of each variant is what ends up in an error
/// envelope, so messages are written for the caller of the tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required field is missing or a field has the wrong type
    #[error("Invalid arguments: field '{field}' {reason}")]
    InvalidArguments { field: String, reason: String },

    /// A required configuration value is absent
    #[error("Missing configuration: {key} is not set")]
    MissingConfiguration { key: String },

    /// A configuration value is present but unusable
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfiguration { key: String, reason: String },

    /// Two handlers tried to register the same tool name
    #[error("Tool registered twice: {0}")]
    DuplicateTool(String),

    /// A local file or script does not exist
    #[error("File not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    /// The external process could not be started
    #[error("Failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    /// The external process ran and exited unsuccessfully
    #[error(
        "External command failed (exit code {}). Error: {stderr}\nOutput: {stdout}",
        code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    ExternalCapabilityFailed {
        code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    /// The external process succeeded but printed no remote URL
    #[error("Failed to extract remote URL. Output: {output}")]
    ExtractionFailed { output: String },

    /// The webhook answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    DeliveryRejected { status: u16 },

    /// The webhook could not be reached
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// I/O error while reading local input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an `InvalidArguments` error for `field`
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a `MissingConfiguration` error for `key`
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfiguration { key: key.into() }
    }
}
