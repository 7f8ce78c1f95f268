//! Tool dispatch core for the relay servers
//!
//! Both relay subsystems (file upload and webhook notification) expose a
//! handful of named tools. This crate holds the part they share:
//!
//! ```text
//! CallRequest ──> Dispatcher ──> ToolRegistry::validate
//!                     │
//!                     └──> ToolHandler::execute ──> external capability
//!                                 │
//!                                 v
//!                            ToolResult (always returned)
//! ```
//!
//! Handlers report failures through [`Result`]; the [`Dispatcher`] turns
//! them into error envelopes so that no call ends in a raw error.

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod registry;

pub use dispatch::{CallRequest, Dispatcher, DispatcherBuilder};
pub use envelope::{ToolContent, ToolOutput, ToolResult};
pub use error::{Error, Result};
pub use handler::{ToolHandler, opt_str_arg, str_arg};
pub use registry::{Arguments, FieldKind, FieldSpec, ToolDescriptor, ToolRegistry};
