//! HTTPS listener.
//!
//! Wraps a `TcpListener` so every accepted connection completes a TLS
//! handshake before axum sees it.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::rustls::pki_types::pem::PemObject;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::server::TlsStream;
use tokio_rustls::TlsAcceptor;

use crate::initialization::init_crypto_provider;

/// Loads a rustls server config from PEM certificate chain and key files.
///
/// # Errors
///
/// Fails if either file cannot be read or parsed, the certificate file holds
/// no certificate, or the key does not match the certificate.
pub fn load_tls_config(cert_path: &Path, key_path: &Path) -> anyhow::Result<Arc<ServerConfig>> {
    init_crypto_provider();

    let certs: Vec<CertificateDer<'static>> = CertificateDer::pem_file_iter(cert_path)
        .with_context(|| format!("Failed to read TLS certificate '{}'", cert_path.display()))?
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to parse TLS certificate '{}'", cert_path.display()))?;

    if certs.is_empty() {
        bail!(
            "TLS certificate file '{}' contains no certificates",
            cert_path.display()
        );
    }

    let key = PrivateKeyDer::from_pem_file(key_path)
        .with_context(|| format!("Failed to read TLS private key '{}'", key_path.display()))?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("TLS certificate and private key do not form a valid pair")?;

    Ok(Arc::new(config))
}

/// A TCP listener that performs the TLS handshake on each accepted connection.
pub struct TlsListener {
    inner: TcpListener,
    acceptor: TlsAcceptor,
}

impl TlsListener {
    pub fn new(listener: TcpListener, config: Arc<ServerConfig>) -> Self {
        Self {
            inner: listener,
            acceptor: TlsAcceptor::from(config),
        }
    }
}

impl axum::serve::Listener for TlsListener {
    type Io = TlsStream<TcpStream>;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        loop {
            let (stream, addr) = match self.inner.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    log::error!("TCP accept error: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };
            // A failed handshake only drops that connection
            match self.acceptor.accept(stream).await {
                Ok(tls) => return (tls, addr),
                Err(e) => log::debug!("TLS handshake with {} failed: {}", addr, e),
            }
        }
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        self.inner.local_addr()
    }
}
