//! MCP Server implementation
//!
//! Reads newline-delimited JSON-RPC messages from stdin, answers on
//! stdout, and hands `tools/call` requests to a [`Dispatcher`].

use relay_core::{CallRequest, Dispatcher, ToolResult};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::Result;
use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability, codes,
};

/// MCP server over one dispatcher
///
/// # Example
///
/// ```ignore
/// use relay_mcp::RelayMcpServer;
///
/// let dispatcher = Dispatcher::builder().handler(handler)?.build();
/// RelayMcpServer::new("fal-mcp-server", dispatcher).run().await?;
/// ```
pub struct RelayMcpServer {
    /// Name reported in `serverInfo`
    name: String,

    dispatcher: Dispatcher,
}

impl RelayMcpServer {
    pub fn new(name: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            name: name.into(),
            dispatcher,
        }
    }

    /// Serve stdin/stdout until stdin closes
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(server = %self.name, "MCP server ready, listening on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to handle message");
                    let response = JsonRpcResponse::error(
                        None,
                        codes::INTERNAL_ERROR,
                        format!("Internal error: {e}"),
                    );
                    serde_json::to_string(&response)?
                }
            };
            if !response.is_empty() {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the serialized response, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                let response =
                    JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {e}"));
                return Ok(serde_json::to_string(&response)?);
            }
        };

        if !request.has_valid_version() {
            tracing::warn!(version = %request.jsonrpc, "Unsupported JSON-RPC version");
            let response = JsonRpcResponse::error(
                request.id,
                codes::INVALID_REQUEST,
                format!("Invalid request: jsonrpc must be \"2.0\", got {:?}", request.jsonrpc),
            );
            return Ok(serde_json::to_string(&response)?);
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Ok(serde_json::to_string(&response)?)
    }

    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .dispatcher
            .tools()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema()
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Tool failures are answered as successful responses carrying an
    /// error envelope; only malformed params are protocol errors.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                ));
            }
        };

        let result = match CallRequest::from_value(params.name, params.arguments) {
            Ok(request) => self.dispatcher.dispatch(request).await,
            Err(e) => ToolResult::error(e.to_string()),
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
