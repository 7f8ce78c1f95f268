//! Send a message, file or embed to the configured Discord webhook
//!
//! ```bash
//! discord-send message "Deploy finished"
//! discord-send file build.log "Nightly log"
//! discord-send embed "Release" "v1.2.0 is out" 00ff00
//! ```
//!
//! The webhook comes from `DISCORD_WEBHOOK_URL` (or `DISCORD_KEY`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relay_cli::{Result, exit_on_error, init_tracing, parse_args};
use relay_core::Arguments;
use relay_notify::{Embed, NotifyConfig, WebhookClient};
use serde_json::Value;

/// Post to a Discord webhook
#[derive(Parser, Debug)]
#[command(name = "discord-send")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Send a text message
    Message {
        /// Message text
        content: String,

        /// Override the webhook's display name
        #[arg(long)]
        username: Option<String>,

        /// Override the webhook's avatar
        #[arg(long)]
        avatar_url: Option<String>,

        /// Send as text-to-speech
        #[arg(long)]
        tts: bool,
    },

    /// Upload a file with an optional caption
    File {
        /// File to send
        path: PathBuf,

        /// Caption posted with the file
        message: Option<String>,
    },

    /// Send an embed
    Embed {
        /// Embed title
        title: String,

        /// Embed description
        description: String,

        /// Hex colour, e.g. ff0000 (default 0099ff)
        color: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    exit_on_error(run()).await;
}

async fn run() -> Result<()> {
    let cli: Cli = parse_args()?;
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let client = WebhookClient::new(NotifyConfig::from_env()?)?;

    let delivery = match cli.command {
        Commands::Message {
            content,
            username,
            avatar_url,
            tts,
        } => {
            let mut extra = Arguments::new();
            if let Some(username) = username {
                extra.insert("username".into(), Value::String(username));
            }
            if let Some(avatar_url) = avatar_url {
                extra.insert("avatar_url".into(), Value::String(avatar_url));
            }
            if tts {
                extra.insert("tts".into(), Value::Bool(true));
            }
            client.send_message(&content, extra).await?
        }
        Commands::File { path, message } => client.send_file(&path, message.as_deref()).await?,
        Commands::Embed {
            title,
            description,
            color,
        } => {
            let embed = Embed::new(title, description, color.as_deref())?;
            client.send_embed(&embed).await?
        }
    };

    println!("✅ {}", delivery.summary);
    Ok(())
}
