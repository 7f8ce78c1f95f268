//! Webhook client
//!
//! All three delivery kinds (text, file, embed) go through
//! [`WebhookClient::deliver`], which posts once and maps the outcome:
//! a 2xx status is a delivery, any other status is `DeliveryRejected`,
//! and a request that never got a response is `TransportFailure`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use relay_core::{Arguments, Error, Result};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::{NotifyConfig, WEBHOOK_URL_ENV};
use crate::embed::Embed;

/// Outcome of a successful delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub delivered: bool,
    pub summary: String,
}

impl Delivery {
    fn sent(summary: impl Into<String>) -> Self {
        Self {
            delivered: true,
            summary: summary.into(),
        }
    }
}

/// Request body for a delivery
#[derive(Debug)]
pub enum Body {
    Json(Value),
    Multipart(Form),
}

/// Client bound to one webhook endpoint
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: Url,
    http: reqwest::Client,
}

impl WebhookClient {
    /// Create a client for the configured webhook.
    ///
    /// Fails immediately if the URL is blank or malformed.
    pub fn new(config: NotifyConfig) -> Result<Self> {
        let raw = config.webhook_url.trim();
        if raw.is_empty() {
            return Err(Error::missing_config(WEBHOOK_URL_ENV));
        }
        let url = Url::parse(raw).map_err(|e| Error::InvalidConfiguration {
            key: WEBHOOK_URL_ENV.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            url,
            http: reqwest::Client::new(),
        })
    }

    /// Post `body` to the webhook once
    pub async fn deliver(&self, body: Body) -> Result<()> {
        let request = self.http.post(self.url.clone());
        let request = match body {
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Webhook request failed");
            Error::TransportFailure(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Webhook rejected delivery");
            return Err(Error::DeliveryRejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(status = %status, "Webhook accepted delivery");
        Ok(())
    }

    /// Send a text message.
    ///
    /// `extra` fields are merged into the payload after `content` and win
    /// on conflicting keys.
    pub async fn send_message(&self, content: &str, extra: Arguments) -> Result<Delivery> {
        let mut payload = Arguments::new();
        payload.insert("content".to_string(), Value::String(content.to_string()));
        payload.extend(extra);

        self.deliver(Body::Json(Value::Object(payload))).await?;
        Ok(Delivery::sent("Message sent"))
    }

    /// Send a file, with an optional caption.
    ///
    /// Relative paths are resolved against the current directory.
    pub async fn send_file(&self, path: &Path, caption: Option<&str>) -> Result<Delivery> {
        let path = resolve(path)?;
        if !path.exists() {
            return Err(Error::ResourceNotFound { path });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let bytes = tokio::fs::read(&path).await?;

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.clone()));
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            form = form.text("payload_json", json!({ "content": caption }).to_string());
        }

        self.deliver(Body::Multipart(form)).await?;
        Ok(Delivery::sent(format!("File sent: {file_name}")))
    }

    /// Send an embed, stamped with the current time
    pub async fn send_embed(&self, embed: &Embed) -> Result<Delivery> {
        let payload = json!({ "embeds": [embed.to_json(Utc::now())] });
        self.deliver(Body::Json(payload)).await?;
        Ok(Delivery::sent("Embed sent"))
    }
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
