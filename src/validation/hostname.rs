//! Hostname grammar (RFC 1123).

use crate::config::{MAX_HOSTNAME_LENGTH, MAX_LABEL_LENGTH};
use crate::error_handling::{InputKind, ProxyError};

/// Validates a fully qualified hostname and returns it lowercased.
///
/// Rules:
/// - at most 253 characters, at least two labels, no trailing dot
/// - each label 1-63 characters from `[A-Za-z0-9-]`, not starting or ending with `-`
/// - the top-level label is not all digits
/// - `localhost` and `*.localhost` are rejected
///
/// # Errors
///
/// Returns `ProxyError::InvalidInput(InputKind::DomainName)` when any rule fails.
pub fn validate_hostname(raw: &str) -> Result<String, ProxyError> {
    if raw.is_empty() || raw.len() > MAX_HOSTNAME_LENGTH {
        return Err(invalid());
    }

    let labels: Vec<&str> = raw.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return Err(invalid());
    }

    if labels
        .last()
        .is_some_and(|tld| tld.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let hostname = raw.to_ascii_lowercase();
    if is_localhost_domain(&hostname) {
        return Err(invalid());
    }

    Ok(hostname)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_localhost_domain(hostname: &str) -> bool {
    hostname == "localhost.localdomain" || hostname.ends_with(".localhost")
}

fn invalid() -> ProxyError {
    ProxyError::InvalidInput(InputKind::DomainName)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hostname_accepts_common_names() {
        for raw in [
            "example.com",
            "www.example.co.uk",
            "a.b.c.example.com",
            "xn--mnchen-3ya.de",
            "my-site.io",
            "1password.com",
            "a.io",
        ] {
            assert!(validate_hostname(raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn test_validate_hostname_lowercases() {
        assert_eq!(validate_hostname("WWW.Example.COM").unwrap(), "www.example.com");
    }

    #[test]
    fn test_validate_hostname_rejects_injection_attempts() {
        for raw in [
            "example.com/../../admin",
            "example.com?token=stolen",
            "example.com#frag",
            "example.com/json",
            "user@example.com",
            "example.com:8080",
            "exa mple.com",
            "example.com%2F",
            "example.com\r\nHost: evil",
        ] {
            assert!(validate_hostname(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_hostname_rejects_malformed_labels() {
        let long_label = "a".repeat(64);
        let long_label_host = format!("{long_label}.com");
        let too_long = format!("{}.com", "a.".repeat(130));
        for raw in [
            "",
            "com",
            "example.",
            ".example.com",
            "example..com",
            "-example.com",
            "example-.com",
            "under_score.com",
            long_label.as_str(),
            long_label_host.as_str(),
            too_long.as_str(),
            "example.123",
        ] {
            assert!(validate_hostname(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_hostname_rejects_localhost() {
        for raw in ["localhost", "LOCALHOST", "app.localhost", "localhost.localdomain"] {
            assert!(validate_hostname(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_validate_hostname_label_at_limit() {
        let label = "a".repeat(63);
        assert!(validate_hostname(&format!("{label}.com")).is_ok());
    }

    #[test]
    fn test_validate_hostname_error_kind() {
        assert!(matches!(
            validate_hostname("not a host"),
            Err(ProxyError::InvalidInput(InputKind::DomainName))
        ));
    }
}
