//! Syntax checks for DNS names, IP literals and CIDR blocks.

use crate::error::{RequestError, Result};
use std::net::IpAddr;

/// Longest permitted domain name in octets, excluding the root dot.
pub const MAX_NAME_LEN: usize = 253;

/// Longest permitted label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// Check that `name` is a well-formed, multi-label DNS domain name.
///
/// A single trailing dot is accepted. Labels may contain ASCII letters,
/// digits, `-` and `_`, but may not start or end with `-`. A bare label
/// such as `"test"` and a purely numeric top-level label are rejected.
#[must_use]
pub fn is_domain_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| is_label(l)) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| !tld.bytes().all(|b| b.is_ascii_digit()))
}

fn is_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Check that `name` is `domain` or sits below it on a label boundary.
///
/// Both sides are compared case-insensitively, ignoring a trailing dot.
#[must_use]
pub fn is_subdomain_of(name: &str, domain: &str) -> bool {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return false;
    }

    name == domain
        || name
            .strip_suffix(domain.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Check that `addr` parses as an IPv4 or IPv6 literal.
#[must_use]
pub fn is_ip_literal(addr: &str) -> bool {
    addr.parse::<IpAddr>().is_ok()
}

/// Parse `addr/len` CIDR notation.
///
/// Host bits may be set; `8.8.8.8/8` yields `(8.8.8.8, 8)`.
pub fn parse_cidr(cidr: &str) -> Result<(IpAddr, u8)> {
    let invalid = || RequestError::InvalidCidr(cidr.to_string());

    let (addr, len) = cidr.split_once('/').ok_or_else(invalid)?;
    let addr: IpAddr = addr.parse().map_err(|_| invalid())?;
    if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let len: u8 = len.parse().map_err(|_| invalid())?;

    let max = match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    if len > max {
        return Err(invalid());
    }

    Ok((addr, len))
}
