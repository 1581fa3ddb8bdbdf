use crate::envelope::{Envelope, EnvelopeKind, Request};
use crate::error::{RequestError, Result};
use crate::tag::Tag;
use crate::validate::is_domain_name;
use serde::{Deserialize, Serialize};

/// Registrant lookup result linking a domain to newly discovered domains
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WhoisRequest {
    /// Domain that was looked up
    pub domain: String,

    /// Domains sharing the same registrant
    #[serde(default)]
    pub new_domains: Vec<String>,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl WhoisRequest {
    /// Create a new WHOIS request
    pub fn new(
        domain: impl Into<String>,
        new_domains: Vec<String>,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            new_domains,
            tag,
            source: source.into(),
        }
    }
}

impl Request for WhoisRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Whois
    }

    fn validate(&self) -> Result<()> {
        if is_domain_name(&self.domain) {
            Ok(())
        } else {
            Err(RequestError::InvalidName(self.domain.clone()))
        }
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn clone_envelope(&self) -> Envelope {
        Envelope::Whois(self.clone())
    }
}
