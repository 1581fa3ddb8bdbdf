//! Provenance tags and trust classification.
//!
//! Every envelope records which technique produced it. Techniques that are
//! hard to spoof (zone transfers, certificates, archives, live DNS) are
//! trusted; guesses, scraping and third-party APIs are not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Technique that produced an envelope
///
/// Equality, hashing and trust all follow the canonical token, so
/// `Tag::Other("DNS".into())` behaves exactly like `Tag::Dns`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    /// No provenance recorded
    #[default]
    None,
    /// Alteration of known names
    Alt,
    /// Machine-learned or statistical guess
    Guess,
    /// Web archive
    Archive,
    /// Third-party API
    Api,
    /// DNS zone transfer
    Axfr,
    /// Brute-force enumeration
    Brute,
    /// Certificate transparency or TLS certificate
    Cert,
    /// Web crawler
    Crawl,
    /// Live DNS answer
    Dns,
    /// External tool output
    External,
    /// Regional internet registry
    Rir,
    /// Scraped web content
    Scrape,
    /// Tag outside the known set
    Other(String),
}

impl Tag {
    /// Canonical upper-case token
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "NONE",
            Self::Alt => "ALT",
            Self::Guess => "GUESS",
            Self::Archive => "ARCHIVE",
            Self::Api => "API",
            Self::Axfr => "AXFR",
            Self::Brute => "BRUTE",
            Self::Cert => "CERT",
            Self::Crawl => "CRAWL",
            Self::Dns => "DNS",
            Self::External => "EXTERNAL",
            Self::Rir => "RIR",
            Self::Scrape => "SCRAPE",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Returns true for authoritative, hard-to-spoof provenance
    #[must_use]
    pub fn is_trusted(&self) -> bool {
        matches!(self.as_str(), "ARCHIVE" | "AXFR" | "CERT" | "DNS")
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

/// Classify a raw tag string. Unknown tags are untrusted.
#[must_use]
pub fn trusted_tag(tag: &str) -> bool {
    Tag::from(tag).is_trusted()
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        match s {
            "NONE" => Self::None,
            "ALT" => Self::Alt,
            "GUESS" => Self::Guess,
            "ARCHIVE" => Self::Archive,
            "API" => Self::Api,
            "AXFR" => Self::Axfr,
            "BRUTE" => Self::Brute,
            "CERT" => Self::Cert,
            "CRAWL" => Self::Crawl,
            "DNS" => Self::Dns,
            "EXTERNAL" => Self::External,
            "RIR" => Self::Rir,
            "SCRAPE" => Self::Scrape,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Tag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trusted_tag() {
        let cases = [
            ("NONE", false),
            ("ALT", false),
            ("GUESS", false),
            ("ARCHIVE", true),
            ("API", false),
            ("AXFR", true),
            ("BRUTE", false),
            ("CERT", true),
            ("DNS", true),
            ("EXTERNAL", false),
            ("SCRAPE", false),
            ("CRAWL", false),
            ("RIR", false),
            ("test", false),
            ("dns", false),
            ("", false),
        ];

        for (value, expected) in cases {
            assert_eq!(trusted_tag(value), expected, "{value}");
        }
    }

    #[test]
    fn test_unknown_tag_preserved() {
        let tag = Tag::from("test");
        assert_eq!(tag, Tag::Other("test".into()));
        assert!(matches!(tag, Tag::Other(_)));
        assert_eq!(tag.to_string(), "test");
    }

    #[test]
    fn test_other_with_known_spelling() {
        let known = [
            Tag::None,
            Tag::Alt,
            Tag::Guess,
            Tag::Archive,
            Tag::Api,
            Tag::Axfr,
            Tag::Brute,
            Tag::Cert,
            Tag::Crawl,
            Tag::Dns,
            Tag::External,
            Tag::Rir,
            Tag::Scrape,
        ];

        for tag in known {
            let spelled = Tag::Other(tag.to_string());
            assert_eq!(spelled.is_trusted(), trusted_tag(&spelled.to_string()));
            assert_eq!(spelled.is_trusted(), tag.is_trusted());
            assert_eq!(spelled, tag);

            let json = serde_json::to_string(&spelled).unwrap();
            let back: Tag = serde_json::from_str(&json).unwrap();
            assert_eq!(back, spelled);
            assert_eq!(back.is_trusted(), spelled.is_trusted());
        }

        assert!(Tag::Other("AXFR".into()).is_trusted());
        assert!(Tag::Other("CERT".into()).is_trusted());
        assert!(!Tag::Other("BRUTE".into()).is_trusted());
    }

    #[test]
    fn test_hash_follows_token() {
        use std::collections::HashSet;

        let set: HashSet<Tag> = [Tag::Dns, Tag::Other("DNS".into()), Tag::from("DNS")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serde_uses_canonical_token() {
        let json = serde_json::to_string(&Tag::Axfr).unwrap();
        assert_eq!(json, "\"AXFR\"");

        let parsed: Tag = serde_json::from_str("\"CERT\"").unwrap();
        assert_eq!(parsed, Tag::Cert);

        let parsed: Tag = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(parsed, Tag::Other("custom".into()));
    }

    proptest! {
        #[test]
        fn trusted_tag_is_total(s in ".*") {
            let expected = matches!(s.as_str(), "ARCHIVE" | "AXFR" | "CERT" | "DNS");
            prop_assert_eq!(trusted_tag(&s), expected);
        }

        #[test]
        fn display_round_trips(s in "[A-Za-z]{0,12}") {
            let tag = Tag::from(s.as_str());
            prop_assert_eq!(tag.to_string(), s);
        }
    }
}
