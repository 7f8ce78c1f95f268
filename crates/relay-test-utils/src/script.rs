//! [`TestScripts`] builder for fake upload scripts.
//!
//! Scripts are plain POSIX shell and are meant to be run with `sh` as the
//! interpreter, which keeps the tests independent of a Python install.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding fake upload scripts and input files.
///
/// # Example
///
/// ```rust,no_run
/// use relay_test_utils::TestScripts;
///
/// let scripts = TestScripts::new();
/// let script = scripts.remote_url_script("https://cdn.test/a.png");
/// let image = scripts.file("a.png", b"png");
/// ```
pub struct TestScripts {
    temp_dir: TempDir,
}

impl Default for TestScripts {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScripts {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a shell script with the given body and make it executable.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        path
    }

    /// A script that logs progress and reports `url` the way the upload
    /// script does on success.
    pub fn remote_url_script(&self, url: &str) -> PathBuf {
        self.script(
            "upload_ok.sh",
            &format!(
                "echo \"Uploading $1\"\necho \"Remote URL: {url}\"\necho \"Done\"\nexit 0"
            ),
        )
    }

    /// A script that exits with `code` after writing to both streams.
    pub fn failing_script(&self, code: i32, stderr: &str) -> PathBuf {
        self.script(
            "upload_fail.sh",
            &format!("echo \"partial output\"\necho \"{stderr}\" >&2\nexit {code}"),
        )
    }

    /// Write an input file.
    pub fn file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
