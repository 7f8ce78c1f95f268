//! Tool results as returned to the protocol caller

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful outcome of a handler, before it is wrapped in an envelope
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Human-readable summary
    pub text: String,
    /// Machine-readable payload, such as an extracted URL
    pub structured: Option<Value>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
        }
    }

    pub fn with_structured(mut self, value: Value) -> Self {
        self.structured = Some(value);
        self
    }
}

/// Content block of a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Envelope returned for every tool call
///
/// Only [`ToolResult::success`] and [`ToolResult::error`] build one, so a
/// result always carries either a success payload or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    structured_content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_error: Option<bool>,
}

impl ToolResult {
    /// Wrap a handler's output
    pub fn success(output: ToolOutput) -> Self {
        Self {
            content: vec![ToolContent::Text { text: output.text }],
            structured_content: output.structured,
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            structured_content: None,
            is_error: Some(true),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error.unwrap_or(false)
    }

    pub fn content(&self) -> &[ToolContent] {
        &self.content
    }

    pub fn structured_content(&self) -> Option<&Value> {
        self.structured_content.as_ref()
    }

    /// All text blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<crate::Result<ToolOutput>> for ToolResult {
    fn from(result: crate::Result<ToolOutput>) -> Self {
        match result {
            Ok(output) => Self::success(output),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
