//! Proxy route handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::state::AppState;
use crate::config::LIVENESS_MESSAGE;
use crate::error_handling::ProxyError;
use crate::upstream::{Provider, UpstreamReply};
use crate::validation::{parse_lookup_target, parse_whois_target, validate_page_url};

/// Liveness check.
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /api/ipinfo/{identifier}`
pub async fn ipinfo_handler(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<UpstreamReply, ProxyError> {
    let target = parse_lookup_target(state.identifier_kind, &identifier)?;
    state
        .relay
        .forward(Provider::IpInfo, &target.to_string())
        .await
}

/// `GET /api/whois/{domain}`
pub async fn whois_handler(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> Result<UpstreamReply, ProxyError> {
    let target = parse_whois_target(&domain)?;
    state
        .relay
        .forward(Provider::Whois, &target.to_string())
        .await
}

#[derive(Debug, Deserialize)]
pub struct PageSpeedQuery {
    url: Option<String>,
}

/// `GET /api/pagespeed?url=...`
pub async fn pagespeed_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageSpeedQuery>,
) -> Result<UpstreamReply, ProxyError> {
    let page = validate_page_url(query.url.as_deref())?;
    state.relay.forward(Provider::PageSpeed, page.as_str()).await
}
