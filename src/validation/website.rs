//! URL validation and normalization utilities.

use log::warn;
use url::{Host, Url};

use super::hostname::validate_hostname;
use crate::config::MAX_URL_LENGTH;
use crate::error_handling::{InputKind, ProxyError};

/// Normalizes a user-typed website address.
///
/// Trims whitespace and prepends `http://` unless the input already starts
/// with `http://` or `https://` (case-insensitive). Returns `None` for empty
/// input, input longer than `MAX_URL_LENGTH`, or anything that does not parse
/// as an http(s) URL with a host.
pub fn normalize_website_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let normalized = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match Url::parse(&normalized) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {
            Some(normalized)
        }
        _ => {
            warn!("Rejecting invalid URL: {trimmed}");
            None
        }
    }
}

/// Extracts the hostname from a normalized website URL.
///
/// IPv6 literals are returned without brackets.
pub fn extract_host(website: &str) -> Option<String> {
    let parsed = Url::parse(website).ok()?;
    match parsed.host()? {
        Host::Domain(domain) => Some(domain.to_string()),
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Validates the page URL handed to the performance provider.
///
/// The URL must be present, no longer than `MAX_URL_LENGTH`, absolute with an
/// `http`/`https` scheme, and its host must be a valid public hostname or an
/// IPv4 address.
///
/// # Errors
///
/// Returns `ProxyError::InvalidInput(InputKind::Url)` otherwise.
pub fn validate_page_url(raw: Option<&str>) -> Result<Url, ProxyError> {
    let invalid = || ProxyError::InvalidInput(InputKind::Url);

    let raw = raw.ok_or_else(invalid)?;
    if raw.is_empty() || raw.len() > MAX_URL_LENGTH {
        return Err(invalid());
    }

    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(invalid());
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => {
            validate_hostname(domain).map_err(|_| invalid())?;
        }
        Some(Host::Ipv4(_)) => {}
        Some(Host::Ipv6(_)) | None => return Err(invalid()),
    }

    Ok(parsed)
}
