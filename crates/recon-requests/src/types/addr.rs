use crate::envelope::{Envelope, EnvelopeKind, Request};
use crate::error::{RequestError, Result};
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// IP address associated with a domain
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddrRequest {
    /// IP literal
    pub address: String,

    /// Domain the address was found under
    pub domain: String,

    /// Whether the address belongs to the scope of the enumeration
    #[serde(default)]
    pub in_scope: bool,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl AddrRequest {
    /// Create a new address request
    pub fn new(
        address: impl Into<String>,
        domain: impl Into<String>,
        in_scope: bool,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            domain: domain.into(),
            in_scope,
            tag,
            source: source.into(),
        }
    }

    /// Parsed address, if the literal is valid
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        self.address.parse().ok()
    }
}

impl Request for AddrRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Addr
    }

    fn validate(&self) -> Result<()> {
        self.ip()
            .map(|_| ())
            .ok_or_else(|| RequestError::InvalidAddress(self.address.clone()))
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn clone_envelope(&self) -> Envelope {
        Envelope::Addr(self.clone())
    }
}
