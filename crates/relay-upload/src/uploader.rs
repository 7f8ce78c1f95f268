//! Subprocess execution of the upload script
//!
//! Runs `<interpreter> <script> <file>` once, waits for it to exit with
//! both output streams buffered, and translates the outcome into an
//! [`UploadReceipt`] or a relay error.

use std::path::Path;
use std::process::Stdio;

use relay_core::{Error, Result};
use tokio::process::Command;

use crate::config::{CREDENTIAL_ENV, UploadConfig};
use crate::extract::extract_remote_url;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Remote URL reported by the script
    pub url: String,
    /// File name of the uploaded file
    pub file_name: String,
    /// Full stdout of the script
    pub log: String,
}

/// Runs the configured upload script
#[derive(Debug, Clone)]
pub struct Uploader {
    config: UploadConfig,
}

impl Uploader {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Upload `file` and return the remote URL.
    ///
    /// Both the file and the script must exist; otherwise no process is
    /// started.
    pub async fn upload(&self, file: &Path) -> Result<UploadReceipt> {
        if !file.exists() {
            return Err(Error::ResourceNotFound {
                path: file.to_path_buf(),
            });
        }
        let script = self.config.script();
        if !script.exists() {
            return Err(Error::ResourceNotFound {
                path: script.to_path_buf(),
            });
        }

        let (program, mut cmd) = self.command(script);
        cmd.arg(file)
            .env(CREDENTIAL_ENV, self.config.credential())
            .stdin(Stdio::null());

        tracing::info!(file = %file.display(), program = %program, "Running upload script");

        let output = cmd.output().await.map_err(|e| Error::SpawnFailed {
            program: program.clone(),
            message: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let code = output.status.code();
            tracing::warn!(?code, "Upload script failed");
            return Err(Error::ExternalCapabilityFailed {
                code,
                stderr,
                stdout,
            });
        }

        let Some(url) = extract_remote_url(&stdout).map(str::to_string) else {
            tracing::warn!("Upload script exited cleanly without a remote URL");
            return Err(Error::ExtractionFailed { output: stdout });
        };

        tracing::info!(url = %url, "Upload finished");
        Ok(UploadReceipt {
            url,
            file_name: file_name(file),
            log: stdout,
        })
    }

    /// Build the command for `script`, returning the program name for errors.
    fn command(&self, script: &Path) -> (String, Command) {
        match self.config.interpreter() {
            Some(interpreter) => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(script);
                (interpreter.to_string(), cmd)
            }
            None => (script.display().to_string(), Command::new(script)),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
