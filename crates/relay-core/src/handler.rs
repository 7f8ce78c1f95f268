//! The seam between the dispatcher and the tool implementations

use async_trait::async_trait;

use crate::Result;
use crate::envelope::ToolOutput;
use crate::registry::{Arguments, ToolDescriptor};

/// A group of tools backed by one external capability.
///
/// `execute` is only called with a tool name taken from `tools()` and
/// with arguments that already passed that tool's contract.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Descriptors of every tool this handler serves
    fn tools(&self) -> Vec<ToolDescriptor>;

    /// Run one tool call to completion
    async fn execute(&self, tool: &str, arguments: &Arguments) -> Result<ToolOutput>;
}

/// Read a string argument that the contract already checked
pub fn str_arg<'a>(arguments: &'a Arguments, field: &str) -> Result<&'a str> {
    arguments
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| crate::Error::invalid_argument(field, "is required"))
}

/// Read an optional string argument, treating `null` as absent
pub fn opt_str_arg<'a>(arguments: &'a Arguments, field: &str) -> Option<&'a str> {
    arguments.get(field).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_arg() {
        let args = json!({"name": "x", "n": 1}).as_object().cloned().unwrap();
        assert_eq!(str_arg(&args, "name").unwrap(), "x");
        assert!(str_arg(&args, "n").is_err());
        assert!(str_arg(&args, "missing").is_err());
        assert_eq!(opt_str_arg(&args, "missing"), None);
    }
}
