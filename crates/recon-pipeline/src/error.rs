use recon_requests::{EnvelopeKind, RequestError, Tag};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Errors from the admission and fan-out stage
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Envelope failed validation
    #[error("rejected {kind} envelope from {source_name}: {reason}")]
    Rejected {
        /// Variant of the rejected envelope
        kind: EnvelopeKind,
        /// Collector that produced it
        source_name: String,
        /// Why validation failed
        #[source]
        reason: RequestError,
    },

    /// Envelope name lies outside its domain
    #[error("{name} is not within {domain}")]
    OutOfDomain {
        /// Sanitized name
        name: String,
        /// Sanitized domain
        domain: String,
    },

    /// Envelope provenance is not trusted and policy requires it
    #[error("untrusted tag {0} refused")]
    Untrusted(Tag),

    /// No consumer is subscribed
    #[error("no consumers subscribed")]
    NoConsumers,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Returns true if the envelope itself was refused by admission policy
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Rejected { .. } | Self::OutOfDomain { .. } | Self::Untrusted(_)
        )
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
