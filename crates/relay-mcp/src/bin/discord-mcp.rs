//! Notification relay MCP server
//!
//! # Environment Variables
//!
//! - `DISCORD_WEBHOOK_URL` (or `DISCORD_KEY`): webhook endpoint (required)
//! - `RUST_LOG`: log verbosity (default: `relay_mcp=info,relay_notify=info`)

use clap::Parser;
use relay_notify::NotifyConfig;

/// MCP server that posts messages to a Discord webhook
#[derive(Parser)]
#[command(name = "discord-mcp")]
#[command(about = "MCP server that sends messages, files and embeds to Discord")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("relay_mcp=info".parse()?)
                .add_directive("relay_notify=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let _args = Args::parse();

    let config = NotifyConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Notification relay is not configured");
    })?;

    tracing::info!("Starting discord-mcp server");

    let server = relay_mcp::notify_server(config)?;
    server.run().await?;

    Ok(())
}
