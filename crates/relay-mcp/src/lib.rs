//! MCP servers for the upload and notification relays
//!
//! Each binary builds a [`relay_core::Dispatcher`] over one relay and
//! serves it over stdio:
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ RelayMcpServer ] ──> Dispatcher ──> UploadHandler | NotifyHandler
//! ```
//!
//! - `fal-mcp`: `upload_image_to_fal`
//! - `discord-mcp`: `discord_send_message`, `discord_send_file`, `discord_send_embed`

pub mod error;
pub mod protocol;
pub mod server;

pub use error::{Error, Result};
pub use server::RelayMcpServer;

use relay_core::Dispatcher;
use relay_notify::{NotifyConfig, NotifyHandler};
use relay_upload::{UploadConfig, UploadHandler};

/// Server exposing the upload tool
pub fn upload_server(config: UploadConfig) -> Result<RelayMcpServer> {
    let dispatcher = Dispatcher::builder()
        .handler(UploadHandler::new(config))?
        .build();
    Ok(RelayMcpServer::new("fal-mcp-server", dispatcher))
}

/// Server exposing the notification tools
pub fn notify_server(config: NotifyConfig) -> Result<RelayMcpServer> {
    let dispatcher = Dispatcher::builder()
        .handler(NotifyHandler::new(config)?)?
        .build();
    Ok(RelayMcpServer::new("discord-sender", dispatcher))
}
