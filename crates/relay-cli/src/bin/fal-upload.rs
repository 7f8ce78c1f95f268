//! Upload an image through the fal upload script
//!
//! ```bash
//! fal-upload screenshots/home.png
//! ```
//!
//! Reads `FAL_KEY`, `FAL_UPLOAD_SCRIPT` and `FAL_UPLOAD_INTERPRETER` from
//! the environment (or `.env`). Inside GitHub Actions the URL is also
//! written to `$GITHUB_OUTPUT` as `fal-url`.

use std::path::{Path, PathBuf};

use clap::Parser;
use relay_cli::{
    GITHUB_OUTPUT_ENV, Result, append_github_output, exit_on_error, init_tracing, parse_args,
};
use relay_upload::{UploadConfig, Uploader};

/// Upload an image to fal.ai and print its public URL
#[derive(Parser, Debug)]
#[command(name = "fal-upload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Image file to upload
    image: PathBuf,

    /// Upload script to run (overrides FAL_UPLOAD_SCRIPT)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Program used to run the script; empty runs it directly
    #[arg(long)]
    interpreter: Option<String>,
}

#[tokio::main]
async fn main() {
    exit_on_error(run()).await;
}

async fn run() -> Result<()> {
    let cli: Cli = parse_args()?;
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let mut config = UploadConfig::from_env()?;
    if let Some(script) = cli.script {
        config = config.with_script(script);
    }
    if let Some(interpreter) = cli.interpreter {
        config = config.with_interpreter(interpreter);
    }

    let receipt = Uploader::new(config).upload(&cli.image).await?;
    tracing::debug!(log = %receipt.log, "Upload script output");

    println!("✅ Uploaded {}", receipt.file_name);
    println!("🔗 URL: {}", receipt.url);

    if let Some(output) = std::env::var_os(GITHUB_OUTPUT_ENV).filter(|v| !v.is_empty()) {
        append_github_output(Path::new(&output), "fal-url", &receipt.url)?;
    }

    Ok(())
}
