use crate::envelope::{Envelope, EnvelopeKind, Request};
use crate::error::{RequestError, Result};
use crate::tag::Tag;
use crate::validate::{is_ip_literal, parse_cidr};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Autonomous-system registration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnRequest {
    /// Address the lookup was made for
    pub address: String,

    /// Autonomous system number
    pub asn: u32,

    /// Announced prefix covering the address (CIDR)
    pub prefix: String,

    /// Two-letter country code of the registrant
    #[serde(default)]
    pub cc: String,

    /// Regional internet registry
    #[serde(default)]
    pub registry: String,

    /// When the AS was allocated
    pub allocation_date: DateTime<Utc>,

    /// Registrant description
    #[serde(default)]
    pub description: String,

    /// Every netblock announced by the AS (CIDR)
    #[serde(default)]
    pub netblocks: Vec<String>,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl AsnRequest {
    /// Create a new ASN request
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        address: impl Into<String>,
        asn: u32,
        prefix: impl Into<String>,
        cc: impl Into<String>,
        registry: impl Into<String>,
        allocation_date: DateTime<Utc>,
        description: impl Into<String>,
        netblocks: Vec<String>,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            asn,
            prefix: prefix.into(),
            cc: cc.into(),
            registry: registry.into(),
            allocation_date,
            description: description.into(),
            netblocks,
            tag,
            source: source.into(),
        }
    }

    /// Netblocks that parse as CIDR, skipping malformed entries
    pub fn valid_netblocks(&self) -> impl Iterator<Item = &str> {
        self.netblocks
            .iter()
            .map(String::as_str)
            .filter(|block| parse_cidr(block).is_ok())
    }
}

impl Request for AsnRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Asn
    }

    fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(RequestError::EmptyPrefix);
        }
        parse_cidr(&self.prefix)?;
        if !is_ip_literal(&self.address) {
            return Err(RequestError::InvalidAddress(self.address.clone()));
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
        Envelope::Asn(self.clone())
    }
}
