//! Normalization of name and domain fields.
//!
//! Sanitizing never fails and never rejects; it only rewrites text so the
//! validators see a canonical form.

use crate::types::{
    AddrRequest, AsnRequest, DnsRequest, ResolvedRequest, SubdomainRequest, WhoisRequest,
    ZoneXfrRequest,
};

const WILDCARD_LABEL: &str = "*.";

/// Normalize a DNS name: trim whitespace, drop leading `*.` labels, lower-case.
///
/// Idempotent: `sanitize_name(&sanitize_name(s)) == sanitize_name(s)`.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let mut rest = name.trim();
    while let Some(stripped) = rest.strip_prefix(WILDCARD_LABEL) {
        rest = stripped.trim_start();
    }
    rest.to_lowercase()
}

/// Normalize the name and domain of a DNS request in place.
pub fn sanitize_dns_request(req: &mut DnsRequest) {
    req.sanitize();
}

/// In-place normalization of an envelope's textual fields
pub trait Sanitize {
    /// Rewrite name-like fields into canonical form
    fn sanitize(&mut self);
}

fn sanitize_in_place(field: &mut String) {
    let clean = sanitize_name(field);
    if *field != clean {
        *field = clean;
    }
}

fn trim_in_place(field: &mut String) {
    let trimmed = field.trim();
    if trimmed.len() != field.len() {
        *field = trimmed.to_string();
    }
}

impl Sanitize for DnsRequest {
    fn sanitize(&mut self) {
        sanitize_in_place(&mut self.name);
        sanitize_in_place(&mut self.domain);
    }
}

impl Sanitize for ResolvedRequest {
    fn sanitize(&mut self) {
        sanitize_in_place(&mut self.name);
        sanitize_in_place(&mut self.domain);
    }
}

impl Sanitize for SubdomainRequest {
    fn sanitize(&mut self) {
        sanitize_in_place(&mut self.name);
        sanitize_in_place(&mut self.domain);
    }
}

impl Sanitize for ZoneXfrRequest {
    fn sanitize(&mut self) {
        sanitize_in_place(&mut self.name);
        sanitize_in_place(&mut self.domain);
        trim_in_place(&mut self.server);
    }
}

impl Sanitize for AddrRequest {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.address);
        sanitize_in_place(&mut self.domain);
    }
}

impl Sanitize for AsnRequest {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.address);
        trim_in_place(&mut self.prefix);
        for block in &mut self.netblocks {
            trim_in_place(block);
        }
    }
}

impl Sanitize for WhoisRequest {
    fn sanitize(&mut self) {
        sanitize_in_place(&mut self.domain);
        for name in &mut self.new_domains {
            sanitize_in_place(name);
        }
    }
}
