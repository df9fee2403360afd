//! Shared helpers.
//!
//! This module provides:
//! - Sanitization of untrusted text before it is written to the log
//! - CSS selector parsing with a non-panicking fallback

mod sanitize;
mod selector;

pub use sanitize::{sanitize_error_message, sanitize_for_log};
pub use selector::parse_selector_with_fallback;
