//! Upload relay MCP server
//!
//! # Usage
//!
//! ```bash
//! fal-mcp [--script <path>] [--interpreter <program>]
//! ```
//!
//! # Environment Variables
//!
//! - `FAL_KEY`: upload credential (required)
//! - `FAL_UPLOAD_SCRIPT`, `FAL_UPLOAD_INTERPRETER`: script location and runner
//! - `RUST_LOG`: log verbosity (default: `relay_mcp=info,relay_upload=info`)
//!
//! A `.env` file in the working directory is loaded first. Logs go to
//! stderr; stdout carries the protocol.

use std::path::PathBuf;

use clap::Parser;
use relay_upload::UploadConfig;

/// MCP server that uploads images through the fal upload script
#[derive(Parser)]
#[command(name = "fal-mcp")]
#[command(about = "MCP server that uploads images to fal.ai")]
#[command(version)]
struct Args {
    /// Upload script to run (overrides FAL_UPLOAD_SCRIPT)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Program used to run the script; empty runs it directly
    #[arg(long)]
    interpreter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("relay_mcp=info".parse()?)
                .add_directive("relay_upload=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = UploadConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Upload relay is not configured");
    })?;
    if let Some(script) = args.script {
        config = config.with_script(script);
    }
    if let Some(interpreter) = args.interpreter {
        config = config.with_interpreter(interpreter);
    }

    tracing::info!(script = %config.script().display(), "Starting fal-mcp server");

    let server = relay_mcp::upload_server(config)?;
    server.run().await?;

    Ok(())
}
