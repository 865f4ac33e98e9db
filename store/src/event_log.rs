//! Immutable event log storage.
//!
//! One entry per indexed governor event, keyed by `(tx hash, log index)`.
//! Entries are written once and never updated.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use stele_events::{EventEnvelope, GovernorEvent};
use stele_types::{Address, BlockContext, HexBytes, LogId, ProposalId, Uint};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: LogId,
    pub block: BlockContext,
    pub event: GovernorEvent,
}

impl EventLogEntry {
    pub fn from_envelope(envelope: &EventEnvelope) -> Self {
        Self {
            id: envelope.log_id(),
            block: envelope.block,
            event: envelope.event.clone(),
        }
    }

    /// The creation record, if this entry is a `ProposalCreated` event.
    pub fn proposal_record(&self) -> Option<ProposalRecord> {
        match &self.event {
            GovernorEvent::ProposalCreated(created) => Some(ProposalRecord {
                id: self.id,
                proposal_id: created.proposal_id.clone(),
                proposer: created.proposer,
                targets: created.targets.clone(),
                values: created.values.clone(),
                signatures: created.signatures.clone(),
                calldatas: created.calldatas.clone(),
                vote_start: created.vote_start.clone(),
                vote_end: created.vote_end.clone(),
                description: created.description.clone(),
                block: self.block,
            }),
            _ => None,
        }
    }
}

/// Flat view of a proposal's creation event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: LogId,
    pub proposal_id: ProposalId,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<Uint>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<HexBytes>,
    pub vote_start: Uint,
    pub vote_end: Uint,
    pub description: String,
    pub block: BlockContext,
}

pub trait EventLogStore {
    fn put_log_entry(&self, entry: &EventLogEntry) -> Result<(), StoreError>;

    fn get_log_entry(&self, id: &LogId) -> Result<Option<EventLogEntry>, StoreError>;

    /// All entries, ordered by key.
    fn iter_log_entries(&self) -> Result<Vec<EventLogEntry>, StoreError>;

    fn log_entry_count(&self) -> Result<u64, StoreError>;

    /// Find the creation record of a proposal by scanning the log.
    fn find_proposal_record(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalRecord>, StoreError> {
        Ok(self
            .iter_log_entries()?
            .iter()
            .filter_map(EventLogEntry::proposal_record)
            .find(|record| &record.proposal_id == proposal_id))
    }
}
