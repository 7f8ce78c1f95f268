//! The `upload_image_to_fal` tool

use std::path::Path;

use async_trait::async_trait;
use relay_core::{
    Arguments, Error, FieldKind, FieldSpec, Result, ToolDescriptor, ToolHandler, ToolOutput,
    str_arg,
};
use serde_json::json;

use crate::config::UploadConfig;
use crate::uploader::{UploadReceipt, Uploader};

/// Name of the upload tool
pub const UPLOAD_TOOL: &str = "upload_image_to_fal";

/// Tool handler wrapping an [`Uploader`]
#[derive(Debug, Clone)]
pub struct UploadHandler {
    uploader: Uploader,
}

impl UploadHandler {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            uploader: Uploader::new(config),
        }
    }

    pub fn uploader(&self) -> &Uploader {
        &self.uploader
    }
}

#[async_trait]
impl ToolHandler for UploadHandler {
    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                UPLOAD_TOOL,
                "Upload an image file to fal.ai and return its remote URL",
            )
            .field(FieldSpec::required(
                "image_path",
                FieldKind::String,
                "Path of the image file to upload",
            )),
        ]
    }

    async fn execute(&self, tool: &str, arguments: &Arguments) -> Result<ToolOutput> {
        match tool {
            UPLOAD_TOOL => {
                let image_path = str_arg(arguments, "image_path")?;
                let receipt = self.uploader.upload(Path::new(image_path)).await?;
                Ok(render(receipt))
            }
            _ => Err(Error::UnknownTool(tool.to_string())),
        }
    }
}

fn render(receipt: UploadReceipt) -> ToolOutput {
    let text = format!(
        "Image uploaded successfully!\n\nFile: {}\nRemote URL: {}\n\nLog:\n{}",
        receipt.file_name, receipt.url, receipt.log
    );
    ToolOutput::text(text).with_structured(json!({
        "url": receipt.url,
        "file": receipt.file_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_declaration() {
        let handler = UploadHandler::new(UploadConfig::new("k", "upload.py").unwrap());
        let tools = handler.tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, UPLOAD_TOOL);
        assert_eq!(tools[0].input_schema()["required"], json!(["image_path"]));
    }

    #[test]
    fn test_render_includes_url_and_log() {
        let output = render(UploadReceipt {
            url: "https://cdn.test/a.png".to_string(),
            file_name: "a.png".to_string(),
            log: "Remote URL: https://cdn.test/a.png\n".to_string(),
        });

        assert!(output.text.contains("Remote URL: https://cdn.test/a.png"));
        assert!(output.text.contains("File: a.png"));
        assert_eq!(output.structured.unwrap()["url"], "https://cdn.test/a.png");
    }

    #[tokio::test]
    async fn test_execute_rejects_foreign_tool() {
        let handler = UploadHandler::new(UploadConfig::new("k", "upload.py").unwrap());
        let err = handler.execute("other", &Arguments::new()).await.unwrap_err();
        assert!(matches!(err, Error::UnknownTool(_)));
    }
}
