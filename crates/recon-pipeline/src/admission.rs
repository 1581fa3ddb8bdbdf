//! Admission: sanitize, validate, then apply policy.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use recon_requests::{Envelope, Request};
use tracing::{debug, trace};

/// Gate every envelope passes before it is dispatched
#[derive(Debug, Clone, Copy, Default)]
pub struct Admission {
    trusted_only: bool,
    check_containment: bool,
}

impl Admission {
    /// Build the gate from configuration
    #[must_use]
    pub const fn new(config: &PipelineConfig) -> Self {
        Self {
            trusted_only: config.trusted_only,
            check_containment: config.check_containment,
        }
    }

    /// Sanitize and validate an envelope, returning it in canonical form.
    ///
    /// Sanitizing always happens before validation.
    pub fn admit(&self, mut envelope: Envelope) -> PipelineResult<Envelope> {
        envelope.sanitize();

        let kind = envelope.kind();
        if let Err(reason) = envelope.validate() {
            debug!(%kind, source = envelope.source(), %reason, "envelope rejected");
            return Err(PipelineError::Rejected {
                kind,
                source_name: envelope.source().to_string(),
                reason,
            });
        }

        if self.check_containment && envelope.in_domain() == Some(false) {
            let (name, domain) = envelope.name_and_domain().unwrap_or_default();
            debug!(%kind, name, domain, "envelope outside its domain");
            return Err(PipelineError::OutOfDomain {
                name: name.to_string(),
                domain: domain.to_string(),
            });
        }

        if self.trusted_only && !envelope.trusted() {
            debug!(%kind, tag = %envelope.tag(), "untrusted envelope refused");
            return Err(PipelineError::Untrusted(envelope.tag().clone()));
        }

        trace!(%kind, source = envelope.source(), tag = %envelope.tag(), "envelope admitted");
        Ok(envelope)
    }
}
