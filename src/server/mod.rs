//! HTTP proxy server.
//!
//! Routes:
//! - `GET /` - liveness string
//! - `GET /api/ipinfo/{identifier}` - geolocation lookup
//! - `GET /api/whois/{domain}` - registration lookup (domain name or IPv4)
//! - `GET /api/pagespeed?url=...` - page performance lookup
//!
//! Every route sits behind the origin policy and the access log.

mod handlers;
mod middleware;
mod state;
mod tls;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;

use crate::config::Config;
use handlers::{ipinfo_handler, liveness, pagespeed_handler, whois_handler};
pub use middleware::{access_log, origin_policy};
pub use state::AppState;
pub use tls::{load_tls_config, TlsListener};

/// Builds the proxy router around shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/ipinfo/{identifier}", get(ipinfo_handler))
        .route("/api/whois/{domain}", get(whois_handler))
        .route("/api/pagespeed", get(pagespeed_handler))
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            origin_policy,
        ))
        .layer(axum::middleware::from_fn(access_log))
        .with_state(state)
}

/// Runs the proxy until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot
/// be created, the TLS files cannot be loaded, the address cannot be bound,
/// or the server fails.
pub async fn run_server(
    config: Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")?;

    for name in config.missing_credentials() {
        log::warn!(
            "{} is not set; calls to that provider will fail upstream authorization",
            name
        );
    }

    let state = AppState::from_config(&config).context("Failed to initialize proxy state")?;
    let router = build_router(Arc::new(state));

    // Load TLS material before binding so a bad certificate fails fast
    let tls_config = match config.tls_paths() {
        Some((cert, key)) => Some(load_tls_config(cert, key)?),
        None => None,
    };

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind proxy to {}:{}", config.host, config.port))?;

    let scheme = if tls_config.is_some() { "https" } else { "http" };
    log::info!(
        "Proxy listening on {}://{}:{}/",
        scheme,
        config.host,
        config.port
    );
    log::info!("  - Allowed origin: {}", config.allowed_origin);
    log::info!("  - Identifier kind: {:?}", config.identifier_kind);

    match tls_config {
        Some(tls) => axum::serve(TlsListener::new(listener, tls), router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Proxy server error")?,
        None => axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Proxy server error")?,
    }

    log::info!("Proxy stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_server_rejects_invalid_config() {
        let config = Config {
            port: 0,
            ..Default::default()
        };
        let err = run_server(config, async {}).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid configuration"));
    }

    #[tokio::test]
    async fn test_run_server_reports_bind_failure() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let config = Config {
            port,
            ..Default::default()
        };
        let err = run_server(config, async {}).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to bind proxy"));
    }

    #[tokio::test]
    async fn test_run_server_reports_unreadable_tls_files() {
        let config = Config {
            tls_cert: Some("/nonexistent/server.crt".into()),
            tls_key: Some("/nonexistent/server.key".into()),
            ..Default::default()
        };
        let err = run_server(config, async {}).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read TLS certificate"));
    }

    #[tokio::test]
    async fn test_run_server_stops_on_shutdown() {
        let free = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = free.local_addr().unwrap().port();
        drop(free);

        let config = Config {
            port,
            ..Default::default()
        };
        // An already-resolved shutdown future stops the server right after binding
        run_server(config, async {}).await.unwrap();
    }
}
