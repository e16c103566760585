//! Body placeholder expansion for the build artifact path.
//!
//! Pipeline authors write `{{ ZIP_FILE_OUTPUT }}` in the message body and
//! the packaging step drops the artifact path into a small side-file; at
//! notify time the placeholder is replaced with that path.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

/// Substitution value when the output-path container is missing or
/// unreadable.
pub const UNKNOWN_PATH: &str = "Unknown Path";

// Token name is fixed and case-sensitive; only the whitespace around it
// inside the braces may vary.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*ZIP_FILE_OUTPUT\s*\}\}").unwrap());

/// Artifact path from the container file: first line, everything before
/// the first `;`, trimmed.
///
/// An empty container path or an unreadable file yields [`UNKNOWN_PATH`];
/// execution continues either way.
pub fn artifact_path(container: &str) -> String {
    if container.trim().is_empty() {
        return UNKNOWN_PATH.to_string();
    }

    match fs::read_to_string(container) {
        Ok(content) => content
            .lines()
            .next()
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_string(),
        Err(_) => UNKNOWN_PATH.to_string(),
    }
}

/// Replace every placeholder occurrence in `body` with the artifact path
/// computed from `container`.
///
/// All occurrences get the same value within one call. The value is
/// inserted verbatim, so backslashes in Windows-style paths survive. A
/// body without placeholders passes through untouched, which also makes
/// re-expansion a no-op.
pub fn expand_body(body: &str, container: &str) -> String {
    if !PLACEHOLDER.is_match(body) {
        return body.to_string();
    }

    let value = artifact_path(container);
    PLACEHOLDER
        .replace_all(body, regex::NoExpand(&value))
        .to_string()
}
