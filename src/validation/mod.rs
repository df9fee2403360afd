//! Identifier validation.
//!
//! Every identifier is checked here before it is placed into an upstream
//! request, so malformed input never costs quota and never reaches a provider
//! together with a credential.

mod hostname;
mod ipv4;
mod website;

use std::fmt;
use std::net::Ipv4Addr;

pub use self::hostname::validate_hostname;
pub use self::ipv4::{looks_like_ipv4, parse_ipv4};
pub use self::website::{extract_host, normalize_website_url, validate_page_url};

use crate::config::IdentifierKind;
use crate::error_handling::ProxyError;

/// A validated geolocation lookup identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Ipv4(Ipv4Addr),
    Hostname(String),
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Ipv4(ip) => write!(f, "{ip}"),
            LookupTarget::Hostname(name) => f.write_str(name),
        }
    }
}

/// Validates an identifier for the geolocation route.
///
/// With [`IdentifierKind::Ip`] only IPv4 addresses pass. With
/// [`IdentifierKind::Domain`] hostnames pass as well; strings made only of
/// digits and dots are still judged by the IPv4 grammar, so `256.1.1.1` fails
/// as an invalid IP address in both modes.
///
/// # Errors
///
/// Returns `ProxyError::InvalidInput` with the kind of grammar that failed.
pub fn parse_lookup_target(kind: IdentifierKind, raw: &str) -> Result<LookupTarget, ProxyError> {
    match kind {
        IdentifierKind::Ip => parse_ipv4(raw).map(LookupTarget::Ipv4),
        IdentifierKind::Domain if looks_like_ipv4(raw) => parse_ipv4(raw).map(LookupTarget::Ipv4),
        IdentifierKind::Domain => validate_hostname(raw).map(LookupTarget::Hostname),
    }
}

/// Validates an identifier for the WHOIS route.
///
/// The registration provider answers for both domain names and IPv4
/// addresses (the owning network's record), so the grammar is the same as
/// the geolocation route in `domain` mode regardless of the deployment
/// setting.
///
/// # Errors
///
/// Returns `ProxyError::InvalidInput` with the kind of grammar that failed.
pub fn parse_whois_target(raw: &str) -> Result<LookupTarget, ProxyError> {
    parse_lookup_target(IdentifierKind::Domain, raw)
}
