//! Shared plumbing for the `fal-upload` and `discord-send` binaries

pub mod error;

pub use error::{CliError, Result};

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::Write;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable naming the GitHub Actions step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Install a DEBUG subscriber on stderr when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

/// Parse the process arguments.
///
/// `--help` and `--version` print and exit 0; usage errors become
/// [`CliError::User`] so they exit 1 like every other failure.
pub fn parse_args<P: Parser>() -> Result<P> {
    parse_args_from(std::env::args_os())
}

/// Parse `args` (program name first), see [`parse_args`].
pub fn parse_args_from<P, I, T>(args: I) -> Result<P>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    P::try_parse_from(args).map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        let rendered = e.to_string();
        CliError::user(rendered.trim_start_matches("error: ").trim_end())
    })
}

/// Run a command, printing `❌ Error: ...` and exiting 1 on failure.
pub async fn exit_on_error<F>(run: F)
where
    F: Future<Output = Result<()>>,
{
    if let Err(e) = run.await {
        eprintln!("{}", format!("❌ Error: {e}").red());
        std::process::exit(1);
    }
}

/// Append `key=value` to a GitHub Actions output file.
pub fn append_github_output(path: &Path, key: &str, value: &str) -> Result<()> {
    if value.contains('\n') {
        return Err(CliError::user(format!(
            "{key} cannot be exported: value spans multiple lines"
        )));
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{key}={value}")?;
    tracing::debug!(path = %path.display(), key, "Wrote step output");
    Ok(())
}
