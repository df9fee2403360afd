//! TLS crypto provider setup.

use rustls::crypto::{ring::default_provider, CryptoProvider};

/// Installs `ring` as the process-wide crypto provider for `rustls`.
///
/// Must run before the listener's `ServerConfig` is built. A second call
/// finds a provider already installed and leaves it in place.
pub fn init_crypto_provider() {
    let _ = CryptoProvider::install_default(default_provider());
}
