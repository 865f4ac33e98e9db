//! Proposal lifecycle status storage.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use stele_types::{ProposalId, Timestamp, Uint};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Created, voting window not yet resolved on chain.
    Pending,
    /// Passed and waiting in the timelock until `eta`.
    Queued { eta: Uint },
    Canceled,
    Executed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Queued { .. } => "queued",
            Self::Canceled => "canceled",
            Self::Executed => "executed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::Executed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalStatusRecord {
    pub proposal_id: ProposalId,
    pub status: ProposalStatus,
    pub updated_block: u64,
    pub updated_timestamp: Timestamp,
}

pub trait ProposalStatusStore {
    fn get_status(&self, proposal_id: &ProposalId)
        -> Result<Option<ProposalStatusRecord>, StoreError>;
    fn put_status(&self, record: &ProposalStatusRecord) -> Result<(), StoreError>;
}
