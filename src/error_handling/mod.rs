//! Error handling.
//!
//! This module provides:
//! - The proxy failure taxonomy (`ProxyError`) and its HTTP mapping
//! - Categorization of transport errors into failure categories
//! - Startup error types
//!
//! Proxy failures are categorized into:
//! - **InvalidInput**: local validation failed, nothing was sent upstream (400)
//! - **UpstreamRejected**: the provider answered with an error status (relayed)
//! - **UpstreamUnreachable**: the call never completed (500 with a category)
//! - **UnknownFailure**: anything else (500 with a generic message)

mod categorization;
mod response;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use response::{json_error, ErrorBody};
pub use types::{FailureCategory, InitializationError, InputKind, ProxyError};

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_input_kind_has_a_message() {
        for kind in InputKind::iter() {
            assert!(kind.message().starts_with("Invalid "));
        }
    }

    #[test]
    fn test_failure_category_messages_are_distinct() {
        let messages: Vec<_> = FailureCategory::iter().map(|c| c.as_str()).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_proxy_error_status() {
        assert_eq!(
            ProxyError::InvalidInput(InputKind::DomainName).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::UpstreamUnreachable(FailureCategory::MalformedRequest).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::UnknownFailure("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::UpstreamRejected {
                status: StatusCode::UNAUTHORIZED,
                content_type: None,
                body: Default::default(),
            }
            .status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_invalid_input_display() {
        assert_eq!(
            ProxyError::InvalidInput(InputKind::IpAddress).to_string(),
            "Invalid IP address format"
        );
    }
}
