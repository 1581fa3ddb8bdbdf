//! Typed request envelopes for a reconnaissance and asset-discovery pipeline.
//!
//! Collectors wrap whatever they find in one of a closed set of envelopes:
//!
//! - **Types**: DNS queries, resolved answers, subdomain guesses, zone-transfer
//!   attempts, address and ASN facts, WHOIS results
//! - **Sanitizing**: canonical lower-case, wildcard-free names via [`Sanitize`]
//! - **Validation**: [`Request::valid`] and [`Request::validate`] with a
//!   [`RequestError`] explaining rejections
//! - **Trust**: [`trusted_tag`] and [`Tag::is_trusted`] classify provenance
//!
//! # Example
//!
//! ```rust
//! use recon_requests::{sanitize_dns_request, DnsRequest, Envelope, Request, Tag};
//!
//! let mut req = DnsRequest::new("*.WWW.Example.com", "Example.com", Vec::new(), Tag::Cert, "ct");
//! sanitize_dns_request(&mut req);
//! assert_eq!(req.name, "www.example.com");
//! assert!(req.valid());
//! assert!(req.trusted());
//!
//! let env: Envelope = req.into();
//! let copy = env.clone_envelope();
//! assert_eq!(copy, env);
//! ```

#![doc(html_root_url = "https://docs.rs/recon-requests/0.1.0")]

mod envelope;
mod error;
mod sanitize;
mod tag;
pub mod types;
pub mod validate;

pub use envelope::{Envelope, EnvelopeKind, Request};
pub use error::{RequestError, Result};
pub use sanitize::{sanitize_dns_request, sanitize_name, Sanitize};
pub use tag::{trusted_tag, Tag};
pub use types::*;
