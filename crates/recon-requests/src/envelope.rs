//! The shared request capability and the closed envelope sum type.

use crate::error::Result;
use crate::sanitize::Sanitize;
use crate::tag::Tag;
use crate::types::{
    AddrRequest, AsnRequest, DnsRequest, ResolvedRequest, SubdomainRequest, WhoisRequest,
    ZoneXfrRequest,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capabilities shared by every envelope variant
pub trait Request {
    /// Which variant this is
    fn kind(&self) -> EnvelopeKind;

    /// Check the envelope is well-formed enough to enter the pipeline
    fn validate(&self) -> Result<()>;

    /// Boolean form of [`Request::validate`]; never panics
    fn valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Provenance tag
    fn tag(&self) -> &Tag;

    /// Collector that produced the envelope
    fn source(&self) -> &str;

    /// Returns true if the provenance is trusted
    fn trusted(&self) -> bool {
        self.tag().is_trusted()
    }

    /// Independent copy, wrapped as an envelope of the same variant
    fn clone_envelope(&self) -> Envelope;
}

/// Variant discriminant, mainly for logging and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeKind {
    /// [`DnsRequest`]
    Dns,
    /// [`ResolvedRequest`]
    Resolved,
    /// [`SubdomainRequest`]
    Subdomain,
    /// [`ZoneXfrRequest`]
    ZoneXfr,
    /// [`AddrRequest`]
    Addr,
    /// [`AsnRequest`]
    Asn,
    /// [`WhoisRequest`]
    Whois,
}

impl EnvelopeKind {
    /// Short lower-case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dns => "dns",
            Self::Resolved => "resolved",
            Self::Subdomain => "subdomain",
            Self::ZoneXfr => "zone_xfr",
            Self::Addr => "addr",
            Self::Asn => "asn",
            Self::Whois => "whois",
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any unit of reconnaissance data flowing through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "request", rename_all = "snake_case")]
pub enum Envelope {
    /// DNS query
    Dns(DnsRequest),
    /// Resolved DNS query
    Resolved(ResolvedRequest),
    /// Subdomain candidate
    Subdomain(SubdomainRequest),
    /// Zone-transfer attempt
    ZoneXfr(ZoneXfrRequest),
    /// Address fact
    Addr(AddrRequest),
    /// Autonomous-system fact
    Asn(AsnRequest),
    /// Registrant lookup
    Whois(WhoisRequest),
}

macro_rules! each_variant {
    ($env:expr, $req:ident => $body:expr) => {
        match $env {
            Envelope::Dns($req) => $body,
            Envelope::Resolved($req) => $body,
            Envelope::Subdomain($req) => $body,
            Envelope::ZoneXfr($req) => $body,
            Envelope::Addr($req) => $body,
            Envelope::Asn($req) => $body,
            Envelope::Whois($req) => $body,
        }
    };
}

impl Envelope {
    /// Normalize textual fields in place
    pub fn sanitize(&mut self) {
        each_variant!(self, req => req.sanitize());
    }

    /// Name and domain for the variants that carry both
    #[must_use]
    pub fn name_and_domain(&self) -> Option<(&str, &str)> {
        match self {
            Self::Dns(r) => Some((r.name.as_str(), r.domain.as_str())),
            Self::Resolved(r) => Some((r.name.as_str(), r.domain.as_str())),
            Self::Subdomain(r) => Some((r.name.as_str(), r.domain.as_str())),
            Self::ZoneXfr(r) => Some((r.name.as_str(), r.domain.as_str())),
            Self::Addr(_) | Self::Asn(_) | Self::Whois(_) => None,
        }
    }

    /// Containment check for the DNS-name family; `None` for other variants
    #[must_use]
    pub fn in_domain(&self) -> Option<bool> {
        match self {
            Self::Dns(r) => Some(r.in_domain()),
            Self::Resolved(r) => Some(r.in_domain()),
            Self::Subdomain(r) => Some(r.in_domain()),
            Self::ZoneXfr(_) | Self::Addr(_) | Self::Asn(_) | Self::Whois(_) => None,
        }
    }
}

impl Request for Envelope {
    fn kind(&self) -> EnvelopeKind {
        each_variant!(self, req => req.kind())
    }

    fn validate(&self) -> Result<()> {
        each_variant!(self, req => req.validate())
    }

    fn tag(&self) -> &Tag {
        each_variant!(self, req => req.tag())
    }

    fn source(&self) -> &str {
        each_variant!(self, req => req.source())
    }

    fn clone_envelope(&self) -> Envelope {
        self.clone()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Envelope {
                fn from(req: $ty) -> Self {
                    Self::$variant(req)
                }
            }
        )*
    };
}

impl_from_variant!(
    Dns(DnsRequest),
    Resolved(ResolvedRequest),
    Subdomain(SubdomainRequest),
    ZoneXfr(ZoneXfrRequest),
    Addr(AddrRequest),
    Asn(AsnRequest),
    Whois(WhoisRequest),
);
