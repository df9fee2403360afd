//! HTTP client initialization.

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for outbound calls.
///
/// Creates a `reqwest::Client` configured with the given User-Agent. No request
/// timeout is set: an upstream call waits as long as the platform allows, and a
/// failure surfaces once, without retry.
///
/// Redirects are never followed. Outbound URLs carry a credential in the query
/// string, so a 3xx is handed back to the caller instead of being chased to
/// another host.
///
/// `reqwest::Client` is reference-counted internally, so one instance is cloned
/// into every component that needs it.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(user_agent: &str) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .redirect(Policy::none())
        .build()?;
    Ok(client)
}

/// Initializes the HTTP client used by the analyzer.
///
/// Unlike [`init_client`], redirects are followed (up to
/// `MAX_REDIRECT_HOPS`), the way a browser loads the analyzed page. This client
/// never carries a provider credential.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_browsing_client(user_agent: &str) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .redirect(Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[tokio::test]
    async fn test_init_client_sends_user_agent() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/"),
                request::headers(contains(("user-agent", "site_insight-test/1.0"))),
            ])
            .respond_with(status_code(200)),
        );

        let client = init_client("site_insight-test/1.0").unwrap();
        let response = client.get(server.url_str("/")).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_init_client_does_not_follow_redirects() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/start"))
                .times(1)
                .respond_with(status_code(302).insert_header("location", "/final")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/final"))
                .times(0)
                .respond_with(status_code(200)),
        );

        let client = init_client("site_insight-test/1.0").unwrap();
        let response = client.get(server.url_str("/start")).send().await.unwrap();
        assert_eq!(response.status(), 302);
    }

    #[tokio::test]
    async fn test_init_browsing_client_follows_redirects() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/start"))
                .times(1)
                .respond_with(status_code(301).insert_header("location", "/final")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/final"))
                .times(1)
                .respond_with(status_code(200).body("<html></html>")),
        );

        let client = init_browsing_client("site_insight-test/1.0").unwrap();
        let response = client.get(server.url_str("/start")).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }
}
