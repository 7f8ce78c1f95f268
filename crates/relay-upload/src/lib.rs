//! Upload relay
//!
//! Makes a local file available at a remote URL by handing it to an
//! external upload script (`<interpreter> <script> <file>`, credential in
//! `FAL_KEY`) and reading the `Remote URL: <url>` line it prints.
//!
//! - [`Uploader`] runs the script and interprets its exit status and output
//! - [`UploadHandler`] exposes it as the `upload_image_to_fal` tool
//! - [`extract_remote_url`] is the only code that knows the output format

pub mod config;
pub mod extract;
pub mod handler;
pub mod uploader;

pub use config::UploadConfig;
pub use extract::extract_remote_url;
pub use handler::{UPLOAD_TOOL, UploadHandler};
pub use uploader::{UploadReceipt, Uploader};
