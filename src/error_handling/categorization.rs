//! Error categorization.
//!
//! Maps transport errors from `reqwest` onto the proxy's failure categories.

use super::types::{FailureCategory, ProxyError};
use crate::utils::sanitize_for_log;

/// Categorizes a `reqwest::Error` into a `FailureCategory`.
///
/// Status errors are never seen here: the relay inspects the status itself and
/// passes rejections through, so every error reaching this function means no
/// usable response arrived.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureCategory {
    if error.is_builder() {
        FailureCategory::MalformedRequest
    } else if error.is_connect() || error.is_timeout() || error.is_request() {
        FailureCategory::NoResponse
    } else {
        FailureCategory::Unknown
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the credential as a query parameter
        let error = error.without_url();
        let category = categorize_reqwest_error(&error);
        log::warn!(
            "Upstream call failed ({}): {}",
            category,
            sanitize_for_log(&error.to_string())
        );
        match category {
            FailureCategory::Unknown => ProxyError::UnknownFailure(error.to_string()),
            other => ProxyError::UpstreamUnreachable(other),
        }
    }
}
