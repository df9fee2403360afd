//! Forwarding of validated lookups to upstream providers.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::IgnoredAny;

use super::provider::Provider;
use crate::config::{Credentials, UpstreamEndpoints};
use crate::error_handling::ProxyError;

/// A successful upstream answer, passed through unchanged.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.body,
        )
            .into_response()
    }
}

/// Sends one outbound GET per lookup with the provider's credential attached.
///
/// The relay holds only immutable data and a cloneable client; concurrent
/// requests share it without coordination.
#[derive(Debug, Clone)]
pub struct Relay {
    client: reqwest::Client,
    endpoints: UpstreamEndpoints,
    credentials: Credentials,
}

impl Relay {
    pub fn new(
        client: reqwest::Client,
        endpoints: UpstreamEndpoints,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            endpoints,
            credentials,
        }
    }

    /// Forwards an already validated identifier to `provider`.
    ///
    /// Exactly one attempt is made. A 2xx answer whose body is JSON is returned
    /// unchanged with status 200; any other status is returned as `ProxyError::UpstreamRejected`
    /// with the upstream body untouched.
    ///
    /// # Errors
    ///
    /// - `UpstreamRejected` for a non-success upstream status
    /// - `UpstreamUnreachable` when no response arrived
    /// - `UnknownFailure` for a 2xx body that is not JSON
    pub async fn forward(
        &self,
        provider: Provider,
        identifier: &str,
    ) -> Result<UpstreamReply, ProxyError> {
        let base = provider.endpoint(&self.endpoints);
        let credential = provider.credential(&self.credentials);
        let url = provider.lookup_url(base, identifier, credential)?;

        log::debug!("Forwarding {} lookup for {}", provider, identifier);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        if !status.is_success() {
            log::warn!("{} upstream answered {} for {}", provider, status, identifier);
            return Err(ProxyError::UpstreamRejected {
                status,
                content_type,
                body,
            });
        }

        if serde_json::from_slice::<IgnoredAny>(&body).is_err() {
            return Err(ProxyError::UnknownFailure(format!(
                "{} upstream returned a non-JSON body ({} bytes)",
                provider,
                body.len()
            )));
        }

        // Any 2xx is answered as a plain 200
        Ok(UpstreamReply {
            status: StatusCode::OK,
            body,
        })
    }
}
