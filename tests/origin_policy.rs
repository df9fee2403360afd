//! Cross-origin policy of the proxy.

mod helpers;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use httptest::{matchers::*, responders::*, Expectation, Server};

use helpers::*;
use site_insight::IdentifierKind;

fn request_from(origin: &str, method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("origin", origin)
        .body(Body::empty())
        .expect("valid test request")
}

#[tokio::test]
async fn test_foreign_origin_is_refused_before_upstream() {
    let server = Server::run();
    server.expect(Expectation::matching(any()).times(0).respond_with(status_code(200)));

    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = send(
        router,
        request_from("http://evil.example", Method::GET, "/api/ipinfo/8.8.8.8"),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text(), r#"{"error":"Origin not allowed"}"#);
    assert!(response.headers.get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_allowed_origin_gets_cors_headers() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/8.8.8.8/json"))
            .times(1)
            .respond_with(status_code(200).body(r#"{"ip":"8.8.8.8"}"#)),
    );

    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = send(
        router,
        request_from(ALLOWED_ORIGIN, Method::GET, "/api/ipinfo/8.8.8.8"),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get("access-control-allow-origin").unwrap(),
        ALLOWED_ORIGIN
    );
    assert!(response
        .headers
        .get_all("vary")
        .iter()
        .any(|v| v.to_str().unwrap_or_default().eq_ignore_ascii_case("origin")));
}

#[tokio::test]
async fn test_allowed_origin_sees_error_responses_too() {
    let server = Server::run();
    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = send(
        router,
        request_from(ALLOWED_ORIGIN, Method::GET, "/api/ipinfo/not-an-ip"),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers.get("access-control-allow-origin").unwrap(),
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let server = Server::run();
    server.expect(Expectation::matching(any()).times(0).respond_with(status_code(200)));

    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = send(
        router,
        request_from(ALLOWED_ORIGIN, Method::OPTIONS, "/api/ipinfo/8.8.8.8"),
    )
    .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers.get("access-control-allow-origin").unwrap(),
        ALLOWED_ORIGIN
    );
    assert!(response
        .headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("GET"));
}

#[tokio::test]
async fn test_preflight_from_foreign_origin() {
    let server = Server::run();
    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = send(
        router,
        request_from("http://localhost:4000", Method::OPTIONS, "/api/ipinfo/8.8.8.8"),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_request_without_origin_passes() {
    let server = Server::run();
    let router = test_router(&test_config(&server, IdentifierKind::Ip));
    let response = get(router, "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers.get("access-control-allow-origin").is_none());
}
