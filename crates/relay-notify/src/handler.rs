//! The `discord_send_*` tools

use std::path::Path;

use async_trait::async_trait;
use relay_core::{
    Arguments, Error, FieldKind, FieldSpec, Result, ToolDescriptor, ToolHandler, ToolOutput,
    opt_str_arg, str_arg,
};
use serde_json::{Value, json};

use crate::client::{Delivery, WebhookClient};
use crate::config::NotifyConfig;
use crate::embed::{DEFAULT_COLOR, Embed};

pub const SEND_MESSAGE_TOOL: &str = "discord_send_message";
pub const SEND_FILE_TOOL: &str = "discord_send_file";
pub const SEND_EMBED_TOOL: &str = "discord_send_embed";

/// Optional message fields forwarded to the webhook as-is
const MESSAGE_EXTRAS: [&str; 3] = ["username", "avatar_url", "tts"];

/// Tool handler wrapping a [`WebhookClient`]
#[derive(Debug, Clone)]
pub struct NotifyHandler {
    client: WebhookClient,
}

impl NotifyHandler {
    /// Fails with `MissingConfiguration` when no webhook URL is configured.
    pub fn new(config: NotifyConfig) -> Result<Self> {
        Ok(Self {
            client: WebhookClient::new(config)?,
        })
    }

    pub fn client(&self) -> &WebhookClient {
        &self.client
    }

    async fn send_message(&self, arguments: &Arguments) -> Result<Delivery> {
        let content = str_arg(arguments, "content")?;
        let extra: Arguments = MESSAGE_EXTRAS
            .iter()
            .filter_map(|key| match arguments.get(*key) {
                None | Some(Value::Null) => None,
                Some(value) => Some((key.to_string(), value.clone())),
            })
            .collect();
        self.client.send_message(content, extra).await
    }

    async fn send_file(&self, arguments: &Arguments) -> Result<Delivery> {
        let file_path = str_arg(arguments, "file_path")?;
        let caption = opt_str_arg(arguments, "message");
        self.client.send_file(Path::new(file_path), caption).await
    }

    async fn send_embed(&self, arguments: &Arguments) -> Result<Delivery> {
        let embed = Embed::new(
            str_arg(arguments, "title")?,
            str_arg(arguments, "description")?,
            opt_str_arg(arguments, "color"),
        )?;
        self.client.send_embed(&embed).await
    }
}

#[async_trait]
impl ToolHandler for NotifyHandler {
    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(SEND_MESSAGE_TOOL, "Send a text message to Discord")
                .field(FieldSpec::required(
                    "content",
                    FieldKind::String,
                    "Message content",
                ))
                .field(FieldSpec::optional(
                    "username",
                    FieldKind::String,
                    "Override the webhook's display name",
                ))
                .field(FieldSpec::optional(
                    "avatar_url",
                    FieldKind::String,
                    "Override the webhook's avatar",
                ))
                .field(FieldSpec::optional(
                    "tts",
                    FieldKind::Boolean,
                    "Send as a text-to-speech message",
                )),
            ToolDescriptor::new(SEND_FILE_TOOL, "Send an image or video file to Discord")
                .field(FieldSpec::required(
                    "file_path",
                    FieldKind::String,
                    "Path of the file to send",
                ))
                .field(FieldSpec::optional(
                    "message",
                    FieldKind::String,
                    "Caption sent with the file (optional)",
                )),
            ToolDescriptor::new(SEND_EMBED_TOOL, "Send an embed message to Discord")
                .field(FieldSpec::required(
                    "title",
                    FieldKind::String,
                    "Embed title",
                ))
                .field(FieldSpec::required(
                    "description",
                    FieldKind::String,
                    "Embed description",
                ))
                .field(
                    FieldSpec::optional(
                        "color",
                        FieldKind::String,
                        "Colour as hex, e.g. \"00ff00\"",
                    )
                    .with_default(json!(DEFAULT_COLOR)),
                ),
        ]
    }

    async fn execute(&self, tool: &str, arguments: &Arguments) -> Result<ToolOutput> {
        let delivery = match tool {
            SEND_MESSAGE_TOOL => self.send_message(arguments).await?,
            SEND_FILE_TOOL => self.send_file(arguments).await?,
            SEND_EMBED_TOOL => self.send_embed(arguments).await?,
            _ => return Err(Error::UnknownTool(tool.to_string())),
        };

        Ok(ToolOutput::text(delivery.summary.clone()).with_structured(json!(delivery)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_webhook_fails_at_construction() {
        let err = NotifyHandler::new(NotifyConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration { .. }));
    }

    #[test]
    fn test_tool_declarations() {
        let handler = NotifyHandler::new(NotifyConfig::new("https://hooks.test/x")).unwrap();
        let tools = handler.tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![SEND_MESSAGE_TOOL, SEND_FILE_TOOL, SEND_EMBED_TOOL]);

        let embed = &tools[2].input_schema();
        assert_eq!(embed["required"], json!(["title", "description"]));
        assert_eq!(embed["properties"]["color"]["default"], "0099ff");
    }
}
