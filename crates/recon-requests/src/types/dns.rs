use crate::envelope::{Envelope, EnvelopeKind, Request};
use crate::error::{RequestError, Result};
use crate::tag::Tag;
use crate::validate::{is_domain_name, is_subdomain_of};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Single resource record attached to a DNS request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnsAnswer {
    /// Owner name of the record
    pub name: String,

    /// Numeric record type (1 = A, 28 = AAAA, ...)
    #[serde(rename = "type")]
    pub record_type: u16,

    /// Record data in presentation format
    pub data: String,
}

impl DnsAnswer {
    /// Create a new answer
    pub fn new(name: impl Into<String>, record_type: u16, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            data: data.into(),
        }
    }

    /// Mnemonic for common record types
    #[must_use]
    pub const fn record_type_name(&self) -> Option<&'static str> {
        Some(match self.record_type {
            1 => "A",
            2 => "NS",
            5 => "CNAME",
            6 => "SOA",
            12 => "PTR",
            15 => "MX",
            16 => "TXT",
            28 => "AAAA",
            33 => "SRV",
            99 => "SPF",
            _ => return None,
        })
    }

    /// Returns true if this is an A or AAAA record
    #[must_use]
    pub const fn is_address_record(&self) -> bool {
        matches!(self.record_type, 1 | 28)
    }

    /// Try to parse the data as an IP address
    #[must_use]
    pub fn as_ip(&self) -> Option<IpAddr> {
        self.data.parse().ok()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if is_domain_name(name) {
        Ok(())
    } else {
        Err(RequestError::InvalidName(name.to_string()))
    }
}

/// DNS query plus any answers collected for it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DnsRequest {
    /// Name being queried
    pub name: String,

    /// Registered domain the name belongs to
    pub domain: String,

    /// Answers attached so far
    #[serde(default)]
    pub records: Vec<DnsAnswer>,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl DnsRequest {
    /// Create a new DNS request
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        records: Vec<DnsAnswer>,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            records,
            tag,
            source: source.into(),
        }
    }

    /// Returns true if `name` is `domain` or one of its subdomains
    #[must_use]
    pub fn in_domain(&self) -> bool {
        is_subdomain_of(&self.name, &self.domain)
    }
}

impl Request for DnsRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Dns
    }

    fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn clone_envelope(&self) -> Envelope {
        Envelope::Dns(self.clone())
    }
}

/// DNS query that has already been resolved
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// Name that was resolved
    pub name: String,

    /// Registered domain the name belongs to
    pub domain: String,

    /// Answers returned by the resolver
    #[serde(default)]
    pub records: Vec<DnsAnswer>,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,
}

impl ResolvedRequest {
    /// Create a new resolved request
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        records: Vec<DnsAnswer>,
        tag: Tag,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            records,
            tag,
            source: source.into(),
        }
    }

    /// Returns true if `name` is `domain` or one of its subdomains
    #[must_use]
    pub fn in_domain(&self) -> bool {
        is_subdomain_of(&self.name, &self.domain)
    }

    /// Addresses carried by A and AAAA answers
    #[must_use]
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.records
            .iter()
            .filter(|r| r.is_address_record())
            .filter_map(DnsAnswer::as_ip)
            .collect()
    }
}

impl From<DnsRequest> for ResolvedRequest {
    fn from(req: DnsRequest) -> Self {
        Self {
            name: req.name,
            domain: req.domain,
            records: req.records,
            tag: req.tag,
            source: req.source,
        }
    }
}

impl Request for ResolvedRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Resolved
    }

    fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn clone_envelope(&self) -> Envelope {
        Envelope::Resolved(self.clone())
    }
}

/// Candidate subdomain and how many times it has been seen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubdomainRequest {
    /// Candidate subdomain
    pub name: String,

    /// Registered domain the subdomain belongs to
    pub domain: String,

    /// Answers attached so far
    #[serde(default)]
    pub records: Vec<DnsAnswer>,

    /// Provenance
    #[serde(default)]
    pub tag: Tag,

    /// Collector that produced the request
    #[serde(default)]
    pub source: String,

    /// Number of times the subdomain has been observed
    #[serde(default)]
    pub times: u32,
}

impl SubdomainRequest {
    /// Create a new subdomain request
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        records: Vec<DnsAnswer>,
        tag: Tag,
        source: impl Into<String>,
        times: u32,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            records,
            tag,
            source: source.into(),
            times,
        }
    }

    /// Returns true if `name` is `domain` or one of its subdomains
    #[must_use]
    pub fn in_domain(&self) -> bool {
        is_subdomain_of(&self.name, &self.domain)
    }
}

impl Request for SubdomainRequest {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Subdomain
    }

    fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if self.times == 0 {
            return Err(RequestError::NeverObserved(self.name.clone()));
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
        Envelope::Subdomain(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tag() -> Tag {
        Tag::from("test")
    }

    fn answers() -> Vec<DnsAnswer> {
        vec![
            DnsAnswer::new("www.example.com", 1, "93.184.216.34"),
            DnsAnswer::new("www.example.com", 5, "example.com"),
        ]
    }

    #[test]
    fn test_dns_request_clone() {
        let req = DnsRequest::new("test", "www.example.com", answers(), test_tag(), "test");

        let mut clone = req.clone();
        assert_eq!(clone, req);

        clone.records.push(DnsAnswer::new("www.example.com", 28, "::1"));
        clone.records[0].data.push_str(".changed");
        assert_eq!(req.records, answers());
    }

    #[test]
    fn test_clone_envelope_keeps_variant() {
        let req = DnsRequest::new("example.com", "example.com", answers(), Tag::Dns, "dns");
        match req.clone_envelope() {
            Envelope::Dns(clone) => assert_eq!(clone, req),
            other => panic!("unexpected variant: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_dns_request_valid() {
        let invalid = DnsRequest::new("test", "www.example.com", Vec::new(), test_tag(), "test");
        assert!(!invalid.valid());
        assert_eq!(
            invalid.validate(),
            Err(RequestError::InvalidName("test".into()))
        );

        let valid = DnsRequest::new("example.com", "example.com", Vec::new(), test_tag(), "test");
        assert!(valid.valid());
    }

    #[test]
    fn test_degenerate_name_equal_to_domain() {
        let req = DnsRequest::new("test", "test", Vec::new(), Tag::None, "test");
        assert!(req.in_domain());
        assert!(!req.valid());
    }

    #[test]
    fn test_domain_not_checked() {
        let req = DnsRequest::new("www.example.com", "not a domain", Vec::new(), Tag::None, "x");
        assert!(req.valid());
        assert!(!req.in_domain());
    }

    #[test]
    fn test_resolved_request() {
        let invalid =
            ResolvedRequest::new("test", "www.example.com", Vec::new(), test_tag(), "test");
        assert!(!invalid.valid());

        let valid =
            ResolvedRequest::new("www.example.com", "example.com", answers(), Tag::Dns, "test");
        assert!(valid.valid());
        assert!(valid.in_domain());
        assert_eq!(
            valid.addresses(),
            vec!["93.184.216.34".parse::<IpAddr>().unwrap()]
        );

        let mut clone = valid.clone();
        clone.records.clear();
        assert_eq!(valid.records.len(), 2);
    }

    #[test]
    fn test_resolved_from_dns_request() {
        let req = DnsRequest::new("www.example.com", "example.com", answers(), Tag::Dns, "dns");
        let resolved = ResolvedRequest::from(req.clone());
        assert_eq!(resolved.name, req.name);
        assert_eq!(resolved.records, req.records);
        assert_eq!(resolved.kind(), EnvelopeKind::Resolved);
    }

    #[test]
    fn test_subdomain_request_valid() {
        let never =
            SubdomainRequest::new("test", "www.example.com", Vec::new(), test_tag(), "test", 0);
        assert!(!never.valid());

        let unseen =
            SubdomainRequest::new("example.com", "example.com", Vec::new(), test_tag(), "test", 0);
        assert_eq!(
            unseen.validate(),
            Err(RequestError::NeverObserved("example.com".into()))
        );

        let seen =
            SubdomainRequest::new("example.com", "example.com", Vec::new(), test_tag(), "test", 3);
        assert!(seen.valid());
    }

    #[test]
    fn test_subdomain_request_clone() {
        let req =
            SubdomainRequest::new("a.example.com", "example.com", answers(), Tag::Brute, "b", 2);
        let mut clone = req.clone();
        assert_eq!(clone, req);
        clone.times += 1;
        clone.records.pop();
        assert_eq!(req.times, 2);
        assert_eq!(req.records.len(), 2);
    }

    #[test]
    fn test_answer_helpers() {
        let a = DnsAnswer::new("example.com", 1, "1.2.3.4");
        assert_eq!(a.record_type_name(), Some("A"));
        assert!(a.is_address_record());
        assert!(a.as_ip().is_some());

        let unknown = DnsAnswer::new("example.com", 65_000, "");
        assert_eq!(unknown.record_type_name(), None);
        assert!(!unknown.is_address_record());
    }

    #[test]
    fn test_serde_field_names() {
        let answer = DnsAnswer::new("example.com", 16, "v=spf1 -all");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["type"], 16);

        let req: DnsRequest =
            serde_json::from_str(r#"{"name":"example.com","domain":"example.com","tag":"CERT"}"#)
                .unwrap();
        assert_eq!(req.tag, Tag::Cert);
        assert!(req.records.is_empty());
        assert!(req.trusted());
    }
}
