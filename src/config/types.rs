//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every secret is read once here, at startup, and handed to
//! the proxy through [`Config`]; nothing reads the environment afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use url::Url;

use crate::config::constants::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROXY_URL, DEFAULT_USER_AGENT,
    IPINFO_BASE_URL, PAGESPEED_BASE_URL, WHOIS_BASE_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which identifiers `/api/ipinfo/{identifier}` accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IdentifierKind {
    /// Dotted-decimal IPv4 addresses only
    Ip,
    /// Hostnames or IPv4 addresses
    Domain,
}

/// A server-held API secret.
///
/// The value never appears in `Debug` or `Display` output so it cannot leak
/// through logs or error messages.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Credential(value.into())
    }

    /// The raw secret, for building the outbound request only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<Option<String>> for Credential {
    fn from(value: Option<String>) -> Self {
        Credential(value.unwrap_or_default())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<unset>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_empty() { "<unset>" } else { "<redacted>" })
    }
}

/// One credential per upstream provider.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub ipinfo: Credential,
    pub whois: Credential,
    pub pagespeed: Credential,
}

/// Base URLs of the upstream providers.
#[derive(Clone, Debug)]
pub struct UpstreamEndpoints {
    pub ipinfo: Url,
    pub whois: Url,
    pub pagespeed: Url,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            ipinfo: parse_builtin_url(IPINFO_BASE_URL),
            whois: parse_builtin_url(WHOIS_BASE_URL),
            pagespeed: parse_builtin_url(PAGESPEED_BASE_URL),
        }
    }
}

// The built-in endpoint constants are valid URLs; a failure here is a typo in
// constants.rs and is covered by `test_upstream_endpoints_default`.
#[allow(clippy::expect_used)]
fn parse_builtin_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in upstream URL must parse")
}

/// Library configuration for the proxy (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use site_insight::{Config, Credential};
///
/// let mut config = Config::default();
/// config.port = 8080;
/// config.credentials.ipinfo = Credential::new("my-token");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// The one browser origin allowed to call the proxy
    pub allowed_origin: String,

    /// Identifier grammar enforced by the geolocation route
    pub identifier_kind: IdentifierKind,

    /// Upstream API secrets
    pub credentials: Credentials,

    /// Upstream provider base URLs
    pub endpoints: UpstreamEndpoints,

    /// HTTP User-Agent header value for outbound requests
    pub user_agent: String,

    /// PEM certificate chain; with `tls_key`, the proxy serves HTTPS
    pub tls_cert: Option<PathBuf>,

    /// PEM private key matching `tls_cert`
    pub tls_key: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            identifier_kind: IdentifierKind::Domain,
            credentials: Credentials::default(),
            endpoints: UpstreamEndpoints::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Config {
    /// Checks the configuration before the proxy starts.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field: a zero port, an allowed origin that is
    /// not a bare `scheme://host[:port]`, or an upstream endpoint that is not an
    /// absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(ConfigValidationError::new(
                "port",
                "must be greater than 0",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigValidationError::new("host", "must not be empty"));
        }

        validate_origin(&self.allowed_origin)?;

        if self.tls_cert.is_some() != self.tls_key.is_some() {
            return Err(ConfigValidationError::new(
                "tls",
                "--tls-cert and --tls-key must be given together",
            ));
        }

        for (field, url) in [
            ("ipinfo_base_url", &self.endpoints.ipinfo),
            ("whois_base_url", &self.endpoints.whois),
            ("pagespeed_base_url", &self.endpoints.pagespeed),
        ] {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(ConfigValidationError::new(
                    field,
                    format!("expected an absolute http:// or https:// URL, got '{url}'"),
                ));
            }
        }

        Ok(())
    }

    /// Certificate and key paths when HTTPS is configured.
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }

    /// Names of the providers whose credential is not set.
    ///
    /// Calls to these providers will fail upstream authorization.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.credentials.ipinfo.is_empty() {
            missing.push("IPINFO_TOKEN");
        }
        if self.credentials.whois.is_empty() {
            missing.push("WHOIS_API_KEY");
        }
        if self.credentials.pagespeed.is_empty() {
            missing.push("PAGESPEED_API_KEY");
        }
        missing
    }
}

fn validate_origin(origin: &str) -> Result<(), ConfigValidationError> {
    let parsed = Url::parse(origin).map_err(|e| {
        ConfigValidationError::new("allowed_origin", format!("'{origin}' is not a URL: {e}"))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigValidationError::new(
            "allowed_origin",
            format!("'{origin}' must use http:// or https://"),
        ));
    }

    // Browsers send the bare serialized origin, so anything else never matches
    if parsed.origin().ascii_serialization() != origin {
        return Err(ConfigValidationError::new(
            "allowed_origin",
            format!(
                "'{origin}' must be a bare origin such as '{}'",
                parsed.origin().ascii_serialization()
            ),
        ));
    }

    Ok(())
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Run the proxy (secrets usually come from .env)
/// IPINFO_TOKEN=... site_insight serve --port 3001 --allowed-origin http://localhost:3000
///
/// # Analyze a site through a running proxy
/// site_insight analyze example.com --proxy-url http://127.0.0.1:3001
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "site_insight",
    version,
    about = "Website analysis through a credential-shielding proxy."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the lookup proxy
    Serve(ServeArgs),
    /// Analyze a website through a running proxy
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The only browser origin allowed to call the proxy
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    pub allowed_origin: String,

    /// Identifiers accepted by /api/ipinfo: ip (IPv4 only) or domain (hostname or IPv4)
    #[arg(long, env = "IDENTIFIER_KIND", value_enum, default_value_t = IdentifierKind::Domain)]
    pub identifier_kind: IdentifierKind,

    /// IPinfo API token
    #[arg(long, env = "IPINFO_TOKEN", hide_env_values = true)]
    pub ipinfo_token: Option<String>,

    /// WhoisXML API key
    #[arg(long, env = "WHOIS_API_KEY", hide_env_values = true)]
    pub whois_api_key: Option<String>,

    /// Google PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub pagespeed_api_key: Option<String>,

    /// IPinfo base URL
    #[arg(long, env = "IPINFO_BASE_URL", default_value = IPINFO_BASE_URL)]
    pub ipinfo_base_url: Url,

    /// WHOIS lookup endpoint
    #[arg(long, env = "WHOIS_BASE_URL", default_value = WHOIS_BASE_URL)]
    pub whois_base_url: Url,

    /// PageSpeed lookup endpoint
    #[arg(long, env = "PAGESPEED_BASE_URL", default_value = PAGESPEED_BASE_URL)]
    pub pagespeed_base_url: Url,

    /// HTTP User-Agent header value for outbound requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// PEM certificate chain for serving HTTPS (requires --tls-key)
    #[arg(long, env = "SSL_CERT_PATH")]
    pub tls_cert: Option<PathBuf>,

    /// PEM private key for serving HTTPS (requires --tls-cert)
    #[arg(long, env = "SSL_KEY_PATH")]
    pub tls_key: Option<PathBuf>,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Config {
            host: args.host,
            port: args.port,
            allowed_origin: args.allowed_origin,
            identifier_kind: args.identifier_kind,
            credentials: Credentials {
                ipinfo: args.ipinfo_token.into(),
                whois: args.whois_api_key.into(),
                pagespeed: args.pagespeed_api_key.into(),
            },
            endpoints: UpstreamEndpoints {
                ipinfo: args.ipinfo_base_url,
                whois: args.whois_base_url,
                pagespeed: args.pagespeed_base_url,
            },
            user_agent: args.user_agent,
            tls_cert: args.tls_cert,
            tls_key: args.tls_key,
        }
    }
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Website to analyze (scheme optional, e.g. example.com)
    pub website: String,

    /// Base URL of a running proxy
    #[arg(long, env = "PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    pub proxy_url: Url,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}
