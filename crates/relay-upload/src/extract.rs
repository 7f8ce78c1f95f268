//! Remote URL extraction from upload script output
//!
//! The upload script reports its result as a log line of the form
//! `Remote URL: <url>`. Everything that depends on that wording lives here.

use std::sync::LazyLock;

use regex::Regex;

/// Literal marker printed before the remote URL
pub const REMOTE_URL_MARKER: &str = "Remote URL: ";

static REMOTE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Remote URL: (https?://\S+)").unwrap());

/// Return the first `http(s)` URL that follows [`REMOTE_URL_MARKER`].
pub fn extract_remote_url(output: &str) -> Option<&str> {
    REMOTE_URL_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
