//! Shared test utilities for the tool-relay workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`script`]: [`TestScripts`] for fake upload scripts and input files
//! - [`webhook`]: [`TestWebhook`], a loopback HTTP endpoint that records requests

pub mod script;
pub mod webhook;

pub use script::TestScripts;
pub use webhook::{CapturedRequest, TestWebhook};
