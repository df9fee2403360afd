//! Shared proxy state.

use axum::http::HeaderValue;

use crate::config::{Config, IdentifierKind};
use crate::error_handling::InitializationError;
use crate::initialization::init_client;
use crate::upstream::Relay;

/// Immutable state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub relay: Relay,
    pub identifier_kind: IdentifierKind,
    pub allowed_origin: HeaderValue,
}

impl AppState {
    /// Builds the state from a validated configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be created or the allowed origin is not
    /// a valid header value.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(&config.user_agent)?;
        let allowed_origin = HeaderValue::from_str(&config.allowed_origin)
            .map_err(|_| InitializationError::OriginHeaderError(config.allowed_origin.clone()))?;

        Ok(Self {
            relay: Relay::new(
                client,
                config.endpoints.clone(),
                config.credentials.clone(),
            ),
            identifier_kind: config.identifier_kind,
            allowed_origin,
        })
    }
}
