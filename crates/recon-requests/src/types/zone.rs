use crate::envelope::{Envelope, EnvelopeKind, Request};
use crate::error::{RequestError, Result};
use crate::tag::Tag;
use serde::{Deserialize, Serialize};

/// Zone-transfer attempt against a specific nameserver
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneXfrRequest {
    /// Zone name to transfer
    pub name: String,

    /// Registered domain the zone belongs to
    pub domain: String,

    /// Nameserver the transfer is requested from
    pub server: String,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl ZoneXfrRequest {
    /// Create a new zone-transfer request
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        server: impl Into<String>,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            server: server.into(),
            tag,
            source: source.into(),
        }
    }
}

impl Request for ZoneXfrRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::ZoneXfr
    }

    /// Only field presence is checked here; the transfer client owns the rest.
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RequestError::MissingField("name"));
        }
        if self.domain.is_empty() {
            return Err(RequestError::MissingField("domain"));
        }
        if self.server.is_empty() {
            return Err(RequestError::MissingField("server"));
        }
        Ok(())
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn clone_envelope(&self) -> Envelope {
        Envelope::ZoneXfr(self.clone())
    }
}
