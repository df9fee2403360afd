//! site_insight library: website analysis behind a credential-shielding proxy
//!
//! The proxy accepts lookup identifiers from a browser-facing client, validates
//! them, attaches server-held API credentials and forwards them to the
//! geolocation, domain-registration and page-performance providers. The
//! analyzer is the client side: it runs the lookups for one website through
//! the proxy and combines them with a meta-tag SEO score.
//!
//! # Example
//!
//! ```no_run
//! use site_insight::{run_server, shutdown_signal, Config, Credential};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config {
//!     port: 3001,
//!     allowed_origin: "http://localhost:3000".to_string(),
//!     ..Default::default()
//! };
//! config.credentials.ipinfo = Credential::new("your-token");
//!
//! run_server(config, shutdown_signal()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod report;
pub mod server;
pub mod upstream;
mod utils;
pub mod validation;

// Re-export public API
pub use config::{Config, Credential, Credentials, IdentifierKind, LogFormat, LogLevel};
pub use error_handling::ProxyError;
pub use report::{AnalysisError, Analyzer, ReportView};
pub use server::{build_router, run_server, shutdown_signal, AppState};
