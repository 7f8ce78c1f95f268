//! Notification relay configuration

use relay_core::{Error, Result};

/// Environment variable holding the webhook URL
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Fallback variable accepted by the standalone sender
pub const WEBHOOK_KEY_ENV: &str = "DISCORD_KEY";

/// Settings for the webhook client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Webhook endpoint every delivery is posted to
    pub webhook_url: String,
}

impl NotifyConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `DISCORD_WEBHOOK_URL`, falling back to `DISCORD_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        [WEBHOOK_URL_ENV, WEBHOOK_KEY_ENV]
            .into_iter()
            .filter_map(&lookup)
            .find(|v| !v.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| Error::missing_config(WEBHOOK_URL_ENV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_variable() {
        let config = NotifyConfig::from_lookup(|key| match key {
            WEBHOOK_URL_ENV => Some("https://hooks.test/a".to_string()),
            WEBHOOK_KEY_ENV => Some("https://hooks.test/b".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.webhook_url, "https://hooks.test/a");
    }

    #[test]
    fn test_fallback_variable() {
        let config = NotifyConfig::from_lookup(|key| match key {
            WEBHOOK_URL_ENV => Some(String::new()),
            WEBHOOK_KEY_ENV => Some("https://hooks.test/b".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.webhook_url, "https://hooks.test/b");
    }

    #[test]
    fn test_missing() {
        let err = NotifyConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration { key } if key == WEBHOOK_URL_ENV));
    }
}
