//! Admission and fan-out stage for reconnaissance request envelopes.
//!
//! Collectors hand raw envelopes to a [`FanOut`]. Each envelope is sanitized,
//! validated and checked against policy by [`Admission`], then every
//! subscribed consumer receives an independent copy over its own bounded
//! channel, so one stage can mutate its envelope without affecting another.
//!
//! # Example
//!
//! ```rust,ignore
//! use recon_pipeline::{FanOut, PipelineConfig};
//! use recon_requests::{DnsRequest, Tag};
//!
//! #[tokio::main]
//! async fn main() -> recon_pipeline::PipelineResult<()> {
//!     let mut fanout = FanOut::new(&PipelineConfig::default());
//!     let mut resolver = fanout.subscribe();
//!     let mut store = fanout.subscribe();
//!
//!     let req = DnsRequest::new("*.WWW.Example.com", "example.com", Vec::new(), Tag::Cert, "ct");
//!     fanout.dispatch(req.into()).await?;
//!
//!     let (a, b) = (resolver.recv().await, store.recv().await);
//!     assert_eq!(a, b);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/recon-pipeline/0.1.0")]

mod admission;
mod config;
mod error;
mod fanout;

pub use admission::Admission;
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use fanout::{DispatchStats, FanOut};
