//! Utilities for sanitizing untrusted text.
//!
//! Upstream error bodies and transport error messages are written to the log;
//! control characters are removed and the length is capped first.

use crate::config::MAX_LOGGED_BODY_CHARS;

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can forge
/// log lines or break terminals. This function removes them while preserving
/// readability.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .filter(|c| *c != '\u{7f}')
        .collect()
}

/// Sanitizes and truncates text for a single log line.
///
/// Newlines are flattened to spaces and the result is capped at
/// `MAX_LOGGED_BODY_CHARS` characters, with a note about the original length.
pub fn sanitize_for_log(message: &str) -> String {
    let sanitized: String = sanitize_error_message(message)
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    let char_count = sanitized.chars().count();
    if char_count > MAX_LOGGED_BODY_CHARS {
        let truncated: String = sanitized.chars().take(MAX_LOGGED_BODY_CHARS).collect();
        format!(
            "{}... (truncated, original length: {} chars)",
            truncated, char_count
        )
    } else {
        sanitized
    }
}
