//! Conversion of proxy errors into HTTP responses.

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::types::{FailureCategory, ProxyError};
use crate::utils::sanitize_for_log;

/// JSON error payload: `{"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Builds a JSON error response with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::InvalidInput(kind) => json_error(StatusCode::BAD_REQUEST, kind.message()),
            ProxyError::UpstreamRejected {
                status,
                content_type,
                body,
            } => {
                log::info!(
                    "Relaying upstream rejection {}: {}",
                    status,
                    sanitize_for_log(&String::from_utf8_lossy(&body))
                );
                let mut response = (status, body).into_response();
                match content_type {
                    Some(value) => {
                        response.headers_mut().insert(CONTENT_TYPE, value);
                    }
                    None => {
                        response.headers_mut().remove(CONTENT_TYPE);
                    }
                }
                response
            }
            ProxyError::UpstreamUnreachable(category) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, category.as_str())
            }
            ProxyError::UnknownFailure(detail) => {
                log::error!("Unexpected proxy failure: {}", sanitize_for_log(&detail));
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FailureCategory::Unknown.as_str(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::InputKind;
    use axum::body::{to_bytes, Bytes};
    use axum::http::HeaderValue;

    async fn body_of(response: Response) -> Bytes {
        to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_response() {
        let response = ProxyError::InvalidInput(InputKind::IpAddress).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            Bytes::from_static(br#"{"error":"Invalid IP address format"}"#)
        );
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_relayed_verbatim() {
        let response = ProxyError::UpstreamRejected {
            status: StatusCode::TOO_MANY_REQUESTS,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(br#"{"error":{"title":"Rate limit exceeded"}}"#),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_of(response).await,
            Bytes::from_static(br#"{"error":{"title":"Rate limit exceeded"}}"#)
        );
    }

    #[tokio::test]
    async fn test_unreachable_response_uses_category_message() {
        let response =
            ProxyError::UpstreamUnreachable(FailureCategory::NoResponse).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body.error, "No response received from upstream provider");
    }

    #[tokio::test]
    async fn test_unknown_failure_hides_detail() {
        let response =
            ProxyError::UnknownFailure("internal detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body.error, "Failed to fetch upstream information");
    }
}
