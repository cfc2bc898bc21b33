// SPDX-License-Identifier: MPL-2.0
//! Message sanitization for diagnostic storage.
//!
//! Notification texts often echo backend error bodies, which may carry
//! server-side file paths. Those are scrubbed before an event is stored.

use std::sync::LazyLock;

use regex::Regex;

/// Compiled regex patterns for path detection.
static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    // Path continues until whitespace or common delimiters (quotes, parens, brackets)
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|/etc/[^\s"'()\[\]]+"#,
        r#"|/opt/[^\s"'()\[\]]+"#,
        r#"|/srv/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#"|\\\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Sanitizes a message by replacing file paths with a `<path>` placeholder.
///
/// # Examples
///
/// ```
/// use hvac_notify::diagnostics::sanitize_message;
///
/// let msg = "Failed to open /srv/api/uploads/orden.pdf";
/// assert_eq!(sanitize_message(msg), "Failed to open <path>");
///
/// let msg = "Cannot read C:\\Users\\name\\file.txt";
/// assert_eq!(sanitize_message(msg), "Cannot read <path>");
///
/// let msg = "Invalid quotation";
/// assert_eq!(sanitize_message(msg), "Invalid quotation");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    PATH_PATTERNS.replace_all(message, "<path>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_unix_home_path() {
        assert_eq!(
            sanitize_message("Error at /home/tech/reports/q3.csv during export"),
            "Error at <path> during export"
        );
    }

    #[test]
    fn sanitize_replaces_multiple_paths() {
        assert_eq!(
            sanitize_message("copy /tmp/a.json to /var/lib/b.json failed"),
            "copy <path> to <path> failed"
        );
    }

    #[test]
    fn sanitize_stops_at_quotes() {
        assert_eq!(
            sanitize_message("missing '/etc/app/conf.toml'"),
            "missing '<path>'"
        );
    }

    #[test]
    fn sanitize_keeps_plain_messages() {
        assert_eq!(
            sanitize_message("Work order 42 saved"),
            "Work order 42 saved"
        );
    }
}
