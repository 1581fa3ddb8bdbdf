//! Fan-out: every consumer receives its own copy of each admitted envelope.
//!
//! Consumers are bounded channels, so a slow consumer applies backpressure to
//! the dispatcher instead of growing an unbounded queue. Consumers whose
//! receiver has been dropped are pruned on the next dispatch.

use crate::admission::Admission;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use recon_requests::{Envelope, Request};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Counters from a batch dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Envelopes that passed admission
    pub admitted: usize,
    /// Envelopes refused by admission
    pub rejected: usize,
    /// Copies handed to consumers
    pub delivered: usize,
}

/// Distributes admitted envelopes to every subscribed consumer
#[derive(Debug)]
pub struct FanOut {
    admission: Admission,
    queue_depth: usize,
    consumers: Vec<mpsc::Sender<Envelope>>,
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl FanOut {
    /// Create a fan-out stage with no consumers
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            admission: Admission::new(config),
            queue_depth: config.queue_depth.max(1),
            consumers: Vec::new(),
        }
    }

    /// Register a consumer and return its receiving end
    pub fn subscribe(&mut self) -> mpsc::Receiver<Envelope> {
        let (tx, rx) = mpsc::channel(self.queue_depth);
        self.consumers.push(tx);
        rx
    }

    /// Number of consumers still listening
    #[must_use]
    pub fn consumer_count(&self) -> usize {
        self.consumers.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Admit an envelope and send a copy to every consumer.
    ///
    /// Returns how many consumers received it.
    pub async fn dispatch(&mut self, envelope: Envelope) -> PipelineResult<usize> {
        let envelope = self.admission.admit(envelope)?;

        self.consumers.retain(|tx| !tx.is_closed());
        if self.consumers.is_empty() {
            return Err(PipelineError::NoConsumers);
        }

        let sends = self
            .consumers
            .iter()
            .map(|tx| tx.send(envelope.clone_envelope()));
        let results = futures_util::future::join_all(sends).await;

        let delivered = results.iter().filter(|r| r.is_ok()).count();
        let dropped = results.len() - delivered;
        if dropped > 0 {
            warn!(dropped, "consumers went away during dispatch");
            self.consumers.retain(|tx| !tx.is_closed());
        }

        debug!(
            kind = %envelope.kind(),
            source = envelope.source(),
            consumers = delivered,
            "envelope dispatched"
        );
        Ok(delivered)
    }

    /// Dispatch a batch, skipping envelopes that fail admission.
    ///
    /// Stops at the first error that is not a rejection.
    pub async fn dispatch_all<I>(&mut self, envelopes: I) -> PipelineResult<DispatchStats>
    where
        I: IntoIterator<Item = Envelope>,
    {
        let mut stats = DispatchStats::default();
        for envelope in envelopes {
            match self.dispatch(envelope).await {
                Ok(delivered) => {
                    stats.admitted += 1;
                    stats.delivered += delivered;
                }
                Err(e) if e.is_rejection() => stats.rejected += 1,
                Err(e) => return Err(e),
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recon_requests::{AsnRequest, DnsAnswer, DnsRequest, Tag};
    use std::time::Duration;

    fn dns(name: &str) -> Envelope {
        DnsRequest::new(
            name,
            "example.com",
            vec![DnsAnswer::new(name, 1, "93.184.216.34")],
            Tag::Dns,
            "resolver",
        )
        .into()
    }

    #[tokio::test]
    async fn test_each_consumer_gets_own_copy() {
        let mut fanout = FanOut::default();
        let mut first = fanout.subscribe();
        let mut second = fanout.subscribe();

        let delivered = fanout.dispatch(dns("WWW.Example.com")).await.unwrap();
        assert_eq!(delivered, 2);

        let mut a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();
        assert_eq!(a, b);

        if let Envelope::Dns(req) = &mut a {
            assert_eq!(req.name, "www.example.com");
            req.records.push(DnsAnswer::new("www.example.com", 28, "::1"));
        }
        match b {
            Envelope::Dns(req) => assert_eq!(req.records.len(), 1),
            other => panic!("unexpected variant: {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_no_consumers() {
        let mut fanout = FanOut::default();
        let err = fanout.dispatch(dns("www.example.com")).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoConsumers));
    }

    #[tokio::test]
    async fn test_rejection_not_delivered() {
        let mut fanout = FanOut::default();
        let mut rx = fanout.subscribe();

        let err = fanout.dispatch(dns("test")).await.unwrap_err();
        assert!(err.is_rejection());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropped_consumer_pruned() {
        let mut fanout = FanOut::default();
        let mut kept = fanout.subscribe();
        let gone = fanout.subscribe();
        drop(gone);

        assert_eq!(fanout.consumer_count(), 1);
        assert_eq!(fanout.dispatch(dns("www.example.com")).await.unwrap(), 1);
        assert!(kept.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_dispatch_all_stats() {
        let mut fanout = FanOut::default();
        let mut rx = fanout.subscribe();

        let bad_asn = AsnRequest::new(
            "8.8.8.8",
            15169,
            "",
            "US",
            "arin",
            Utc::now(),
            "GOOGLE",
            Vec::new(),
            Tag::Rir,
            "asn",
        );
        let batch = vec![dns("a.example.com"), bad_asn.into(), dns("b.example.com")];

        let stats = fanout.dispatch_all(batch).await.unwrap();
        assert_eq!(
            stats,
            DispatchStats {
                admitted: 2,
                rejected: 1,
                delivered: 2,
            }
        );

        let names: Vec<_> = [rx.recv().await.unwrap(), rx.recv().await.unwrap()]
            .iter()
            .filter_map(|e| e.name_and_domain().map(|(n, _)| n.to_string()))
            .collect();
        assert_eq!(names, vec!["a.example.com", "b.example.com"]);
    }

    #[tokio::test]
    async fn test_bounded_queue_backpressure() {
        let mut fanout = FanOut::new(&PipelineConfig {
            queue_depth: 1,
            ..PipelineConfig::default()
        });
        let mut rx = fanout.subscribe();

        fanout.dispatch(dns("a.example.com")).await.unwrap();
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), fanout.dispatch(dns("b.example.com")))
                .await;
        assert!(blocked.is_err());

        assert!(rx.recv().await.is_some());
    }

    #[test]
    fn test_dispatch_blocking() {
        let mut fanout = FanOut::default();
        let mut rx = fanout.subscribe();
        let delivered = tokio_test::block_on(fanout.dispatch(dns("www.example.com"))).unwrap();
        assert_eq!(delivered, 1);
        assert!(rx.try_recv().is_ok());
    }
}
