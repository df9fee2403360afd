//! IPv4 address grammar.
//!
//! Accepts only the canonical dotted-decimal form: exactly four octets, each a
//! decimal number in `[0, 255]` without leading zeros, and nothing before,
//! between or after them.

use std::net::Ipv4Addr;

use crate::error_handling::{InputKind, ProxyError};

/// Parses a canonical dotted-decimal IPv4 address.
///
/// # Errors
///
/// Returns `ProxyError::InvalidInput(InputKind::IpAddress)` for anything else,
/// including `"999.1.1.1"`, `"1.2.3"`, `"1.2.3.4.5"`, `"01.2.3.4"` and strings
/// with surrounding whitespace.
pub fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, ProxyError> {
    let mut octets = [0u8; 4];
    let mut parts = raw.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next().ok_or(invalid())?;
        *octet = parse_octet(part).ok_or(invalid())?;
    }

    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Ipv4Addr::from(octets))
}

/// Whether the string is built only from digits and dots.
///
/// Such a string can only ever be meant as an IPv4 address, so it is judged by
/// the IPv4 grammar even where hostnames are accepted.
pub fn looks_like_ipv4(raw: &str) -> bool {
    raw.bytes().any(|b| b.is_ascii_digit()) && raw.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse::<u8>().ok()
}

fn invalid() -> ProxyError {
    ProxyError::InvalidInput(InputKind::IpAddress)
}
