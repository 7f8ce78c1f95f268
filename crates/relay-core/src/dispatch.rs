//! Call routing
//!
//! The [`Dispatcher`] is the single entry point for tool calls. It
//! validates the call against the registry, runs the bound handler and
//! turns whatever happened into a [`ToolResult`]. `dispatch` has no error
//! path: every failure below it becomes an error envelope.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::envelope::ToolResult;
use crate::handler::ToolHandler;
use crate::registry::{Arguments, ToolDescriptor, ToolRegistry};
use crate::{Error, Result};

/// A single tool call
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub name: String,
    pub arguments: Arguments,
}

impl CallRequest {
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a request from raw protocol arguments.
    ///
    /// `null` becomes an empty argument map; any other non-object value
    /// is rejected.
    pub fn from_value(name: impl Into<String>, arguments: Value) -> Result<Self> {
        let arguments = match arguments {
            Value::Null => Arguments::new(),
            Value::Object(map) => map,
            _ => {
                return Err(Error::invalid_argument(
                    "arguments",
                    "must be a JSON object",
                ));
            }
        };
        Ok(Self::new(name, arguments))
    }
}

/// Routes validated calls to their handlers
pub struct Dispatcher {
    registry: ToolRegistry,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Registered tools in registration order
    pub fn tools(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one call and return its envelope
    pub async fn dispatch(&self, request: CallRequest) -> ToolResult {
        let CallRequest { name, arguments } = request;

        if let Err(e) = self.registry.validate(&name, &arguments) {
            tracing::warn!(tool = %name, error = %e, "Rejected tool call");
            return ToolResult::error(e.to_string());
        }

        let Some(handler) = self.handlers.get(&name) else {
            // Every registered name is bound at build time
            return ToolResult::error(Error::UnknownTool(name).to_string());
        };

        tracing::debug!(tool = %name, "Dispatching tool call");
        match handler.execute(&name, &arguments).await {
            Ok(output) => {
                tracing::info!(tool = %name, "Tool call succeeded");
                ToolResult::success(output)
            }
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Tool call failed");
                ToolResult::error(e.to_string())
            }
        }
    }
}

/// Collects handlers and binds their tools
#[derive(Default)]
pub struct DispatcherBuilder {
    registry: ToolRegistry,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl DispatcherBuilder {
    /// Register every tool the handler declares.
    ///
    /// Fails with `DuplicateTool` if a name is already taken.
    pub fn handler<H>(mut self, handler: H) -> Result<Self>
    where
        H: ToolHandler + 'static,
    {
        let handler: Arc<dyn ToolHandler> = Arc::new(handler);
        for descriptor in handler.tools() {
            let name = descriptor.name.clone();
            self.registry.register(descriptor)?;
            self.handlers.insert(name, Arc::clone(&handler));
        }
        Ok(self)
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: self.registry,
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ToolOutput;
    use crate::handler::str_arg;
    use crate::registry::{FieldKind, FieldSpec};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes its `text` argument and counts invocations
    struct EchoHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ToolHandler for EchoHandler {
        fn tools(&self) -> Vec<ToolDescriptor> {
            vec![
                ToolDescriptor::new("echo", "Echo text")
                    .field(FieldSpec::required("text", FieldKind::String, "Text")),
                ToolDescriptor::new("fail", "Always fails"),
            ]
        }

        async fn execute(&self, tool: &str, arguments: &Arguments) -> Result<ToolOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match tool {
                "echo" => Ok(ToolOutput::text(str_arg(arguments, "text")?)),
                _ => Err(Error::DeliveryRejected { status: 503 }),
            }
        }
    }

    fn dispatcher() -> (Dispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = EchoHandler {
            calls: Arc::clone(&calls),
        };
        let dispatcher = Dispatcher::builder().handler(handler).unwrap().build();
        (dispatcher, calls)
    }

    fn request(name: &str, args: Value) -> CallRequest {
        CallRequest::from_value(name, args).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_tool_invokes_no_handler() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher.dispatch(request("nope", json!({}))).await;

        assert!(!result.is_success());
        assert_eq!(result.text(), "Unknown tool: nope");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_argument_invokes_no_handler() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher.dispatch(request("echo", Value::Null)).await;

        assert!(!result.is_success());
        assert!(result.text().contains("'text'"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_becomes_envelope() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher.dispatch(request("fail", json!({}))).await;

        assert!(!result.is_success());
        assert_eq!(result.text(), "HTTP error! status: 503");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_independent() {
        let (dispatcher, calls) = dispatcher();
        let first = dispatcher.dispatch(request("echo", json!({"text": "hi"}))).await;
        let second = dispatcher.dispatch(request("echo", json!({"text": "hi"}))).await;

        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_duplicate_handler_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = Dispatcher::builder()
            .handler(EchoHandler {
                calls: Arc::clone(&calls),
            })
            .unwrap()
            .handler(EchoHandler { calls });
        assert!(matches!(result, Err(Error::DuplicateTool(name)) if name == "echo"));
    }

    #[test]
    fn test_tools_listing() {
        let (dispatcher, _) = dispatcher();
        let names: Vec<&str> = dispatcher.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["echo", "fail"]);
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let err = CallRequest::from_value("echo", json!(["a"])).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { field, .. } if field == "arguments"));
    }
}
