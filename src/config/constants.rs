//! Configuration constants.
//!
//! Defaults for the proxy listener, the upstream provider endpoints and the
//! limits applied to caller-supplied input.

// Proxy listener
/// Default bind address for the proxy
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default proxy port
pub const DEFAULT_PORT: u16 = 3001;
/// The single browser origin allowed to call the proxy by default
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
/// Body returned by the liveness route
pub const LIVENESS_MESSAGE: &str = "site_insight proxy is running";

// Upstream providers
/// IPinfo lookup base; the identifier and `/json` are appended as path segments
pub const IPINFO_BASE_URL: &str = "https://ipinfo.io";
/// WhoisXML API lookup endpoint
pub const WHOIS_BASE_URL: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";
/// Google PageSpeed Insights v5 endpoint
pub const PAGESPEED_BASE_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Default proxy location used by the `analyze` command
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3001";

/// User-Agent sent on outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!("site_insight/", env!("CARGO_PKG_VERSION"));

/// Redirects the analyzer follows when loading a page
pub const MAX_REDIRECT_HOPS: usize = 10;

// Response and body size limits
/// Maximum page body size in bytes (2MB) read by the SEO heuristic
/// Larger pages are refused to prevent memory exhaustion
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Input limits
/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;
/// Maximum hostname length in characters (RFC 1035)
pub const MAX_HOSTNAME_LENGTH: usize = 253;
/// Maximum length of a single hostname label
pub const MAX_LABEL_LENGTH: usize = 63;

/// A page with more `<meta>` tags than this scores "Good"
pub const SEO_META_TAG_THRESHOLD: usize = 5;

// Log limits
/// Maximum number of characters of an upstream error body written to the log
pub const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Log target of the per-request access lines, so they can be filtered with
/// `RUST_LOG` (e.g. `RUST_LOG=site_insight::access=info`).
pub const ACCESS_LOG_TARGET: &str = "site_insight::access";
