//! Governor event indexer.
//!
//! Pulls decoded events from an [`EventSource`] in block order and hands
//! each one to the [`EventHandler`], which:
//! - appends an immutable log entry for every event,
//! - upserts the voter's [`VoteRecord`](stele_store::VoteRecord) for votes,
//! - drives the [`VoteAggregator`](stele_governance::VoteAggregator) for
//!   creation, votes, cancellation and execution,
//! - tracks proposal status and governor-wide settings.
//!
//! Processing is single-threaded and strictly sequential. A store failure
//! aborts the run at the failing event.

pub mod config;
pub mod error;
pub mod handler;
pub mod indexer;
pub mod logging;
pub mod metrics;
pub mod source;

pub use config::IndexerConfig;
pub use error::IndexerError;
pub use handler::EventHandler;
pub use indexer::{Indexer, RunSummary};
pub use logging::{init_logging, LogFormat};
pub use metrics::IndexerMetrics;
pub use source::{EventSource, JsonLinesSource};
