//! Abstract storage traits for the Stele governor indexer.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The aggregation and indexing code depends only on the traits and
//! receives a concrete store by injection.

pub mod error;
pub mod event_log;
pub mod settings;
pub mod status;
pub mod vote;
pub mod vote_result;

pub use error::StoreError;
pub use event_log::{EventLogEntry, EventLogStore, ProposalRecord};
pub use settings::{GovernorSettings, SettingsStore};
pub use status::{ProposalStatus, ProposalStatusRecord, ProposalStatusStore};
pub use vote::{VoteRecord, VoteStore};
pub use vote_result::{ProposalVoteResult, VoteResultStore};

/// Everything the indexer persists, as a single bound.
pub trait IndexStore:
    EventLogStore + VoteStore + VoteResultStore + SettingsStore + ProposalStatusStore
{
}

impl<T> IndexStore for T where
    T: EventLogStore + VoteStore + VoteResultStore + SettingsStore + ProposalStatusStore
{
}
