//! Notification relay
//!
//! Delivers text messages, files and embeds to a single pre-configured
//! webhook endpoint and reports whether the endpoint accepted them.
//!
//! # Tools
//!
//! - `discord_send_message`: JSON `{content, ...extras}`
//! - `discord_send_file`: multipart `file` part plus optional `payload_json` caption
//! - `discord_send_embed`: JSON `{embeds: [embed]}` with the colour parsed from hex

pub mod client;
pub mod config;
pub mod embed;
pub mod handler;

pub use client::{Body, Delivery, WebhookClient};
pub use config::NotifyConfig;
pub use embed::{DEFAULT_COLOR, Embed, parse_color};
pub use handler::{NotifyHandler, SEND_EMBED_TOOL, SEND_FILE_TOOL, SEND_MESSAGE_TOOL};
