// Shared test helpers for building a proxy against a mock upstream.
//
// Every provider endpoint points at one httptest server so each test can set
// expectations per provider path.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use httptest::Server;
use tower::ServiceExt;
use url::Url;

use site_insight::config::UpstreamEndpoints;
use site_insight::{build_router, AppState, Config, Credential, Credentials, IdentifierKind};

pub const IPINFO_TOKEN: &str = "ipinfo-secret-token";
pub const WHOIS_KEY: &str = "whois-secret-key";
pub const PAGESPEED_KEY: &str = "pagespeed-secret-key";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub const WHOIS_PATH: &str = "/whoisserver/WhoisService";
pub const PAGESPEED_PATH: &str = "/pagespeedonline/v5/runPagespeed";

/// Builds a proxy config whose providers all live on `server`.
pub fn test_config(server: &Server, kind: IdentifierKind) -> Config {
    test_config_with_base(&server.url_str(""), kind)
}

/// Builds a proxy config whose providers all live under `base`.
pub fn test_config_with_base(base: &str, kind: IdentifierKind) -> Config {
    let base = base.trim_end_matches('/');
    let url = |path: &str| Url::parse(&format!("{base}{path}")).expect("valid test URL");
    Config {
        allowed_origin: ALLOWED_ORIGIN.to_string(),
        identifier_kind: kind,
        credentials: Credentials {
            ipinfo: Credential::new(IPINFO_TOKEN),
            whois: Credential::new(WHOIS_KEY),
            pagespeed: Credential::new(PAGESPEED_KEY),
        },
        endpoints: UpstreamEndpoints {
            ipinfo: url("/"),
            whois: url(WHOIS_PATH),
            pagespeed: url(PAGESPEED_PATH),
        },
        ..Default::default()
    }
}

/// Builds the router for `config`.
pub fn test_router(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("Failed to build test state");
    build_router(Arc::new(state))
}

/// Response pieces a test inspects.
#[allow(dead_code)] // Not every test file reads every field
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// Sends `request` through the router without binding a socket.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

/// GET without an `Origin` header.
#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid test request");
    send(router, request).await
}

/// A loopback URL on a port nothing listens on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
