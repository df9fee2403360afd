//! Error type definitions.
//!
//! This module defines the proxy's failure taxonomy and the startup errors.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The allowed origin cannot be sent as a header value.
    #[error("Invalid allowed origin '{0}'")]
    OriginHeaderError(String),
}

/// Which grammar a rejected identifier failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InputKind {
    IpAddress,
    DomainName,
    Url,
}

impl InputKind {
    /// The message returned to the caller in the `error` field.
    pub fn message(&self) -> &'static str {
        match self {
            InputKind::IpAddress => "Invalid IP address format",
            InputKind::DomainName => "Invalid domain name format",
            InputKind::Url => "Invalid URL format",
        }
    }
}

/// Why an outbound call produced no upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureCategory {
    /// Connection, timeout or transport failure before any response arrived
    NoResponse,
    /// The outbound request could not be built
    MalformedRequest,
    /// Anything else
    Unknown,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::NoResponse => "No response received from upstream provider",
            FailureCategory::MalformedRequest => "Failed to build upstream request",
            FailureCategory::Unknown => "Failed to fetch upstream information",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a proxied lookup can fail.
///
/// Each variant maps to exactly one HTTP response (see `IntoResponse` in
/// `error_handling::response`). Messages never contain the upstream URL, which
/// carries the credential.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The identifier failed local validation; no upstream call was made.
    #[error("{}", .0.message())]
    InvalidInput(InputKind),

    /// The upstream answered with a non-success status.
    #[error("upstream rejected the request with status {status}")]
    UpstreamRejected {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    /// The upstream call never completed.
    #[error("{0}")]
    UpstreamUnreachable(FailureCategory),

    /// Any other failure; the detail is logged, not returned.
    #[error("unexpected failure: {0}")]
    UnknownFailure(String),
}

impl ProxyError {
    /// Status code the caller will see.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamRejected { status, .. } => *status,
            ProxyError::UpstreamUnreachable(_) | ProxyError::UnknownFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
