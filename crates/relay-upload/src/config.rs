//! Upload relay configuration

use std::path::{Path, PathBuf};

use relay_core::{Error, Result};
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the upload credential
pub const CREDENTIAL_ENV: &str = "FAL_KEY";

/// Environment variable overriding the upload script location
pub const SCRIPT_ENV: &str = "FAL_UPLOAD_SCRIPT";

/// Environment variable overriding the script interpreter
pub const INTERPRETER_ENV: &str = "FAL_UPLOAD_INTERPRETER";

/// Script file looked up next to the running executable
pub const DEFAULT_SCRIPT_NAME: &str = "upload_to_fal.py";

/// Interpreter used when none is configured
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Settings for the upload handler, fixed at construction.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Upload credential, passed to the script via [`CREDENTIAL_ENV`]
    credential: SecretString,

    /// Path of the upload script
    script: PathBuf,

    /// Program that runs the script; `None` runs the script directly
    interpreter: Option<String>,
}

impl UploadConfig {
    /// Create a configuration using the default interpreter.
    ///
    /// Fails with `MissingConfiguration` if the credential is blank.
    pub fn new(credential: impl Into<String>, script: impl Into<PathBuf>) -> Result<Self> {
        let credential = credential.into();
        if credential.trim().is_empty() {
            return Err(Error::missing_config(CREDENTIAL_ENV));
        }
        Ok(Self {
            credential: SecretString::new(credential),
            script: script.into(),
            interpreter: Some(DEFAULT_INTERPRETER.to_string()),
        })
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `FAL_KEY` (required)
    /// - `FAL_UPLOAD_SCRIPT` (optional, defaults to `upload_to_fal.py` beside the executable)
    /// - `FAL_UPLOAD_INTERPRETER` (optional, defaults to `python3`; empty runs the script directly)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup(CREDENTIAL_ENV).unwrap_or_default();
        let script = lookup(SCRIPT_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_script_path);

        let config = Self::new(credential, script)?;
        Ok(match lookup(INTERPRETER_ENV) {
            Some(interpreter) => config.with_interpreter(interpreter),
            None => config,
        })
    }

    /// Use a different upload script
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    /// Set the interpreter; an empty string runs the script directly.
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        let interpreter = interpreter.into();
        self.interpreter = (!interpreter.trim().is_empty()).then_some(interpreter);
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_deref()
    }

    pub(crate) fn credential(&self) -> &str {
        self.credential.expose_secret()
    }
}

fn default_script_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_SCRIPT_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_credential() {
        let err = UploadConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration { key } if key == "FAL_KEY"));
    }

    #[test]
    fn test_blank_credential() {
        let err = UploadConfig::new("  ", "upload.py").unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration { .. }));
    }

    #[test]
    fn test_defaults() {
        let config = UploadConfig::from_lookup(lookup(&[("FAL_KEY", "secret")])).unwrap();
        assert_eq!(config.interpreter(), Some("python3"));
        assert!(config.script().ends_with(DEFAULT_SCRIPT_NAME));
        assert_eq!(config.credential(), "secret");
    }

    #[test]
    fn test_overrides() {
        let config = UploadConfig::from_lookup(lookup(&[
            ("FAL_KEY", "secret"),
            ("FAL_UPLOAD_SCRIPT", "/opt/upload.sh"),
            ("FAL_UPLOAD_INTERPRETER", ""),
        ]))
        .unwrap();
        assert_eq!(config.script(), Path::new("/opt/upload.sh"));
        assert_eq!(config.interpreter(), None);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = UploadConfig::new("super-secret", "upload.py").unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
