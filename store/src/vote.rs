//! Individual vote storage.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use stele_types::{Address, BlockContext, HexBytes, ProposalId, Uint};

/// The latest vote a voter cast on a proposal.
///
/// Keyed by `(proposal_id, voter)`. A revote overwrites the previous record;
/// no per-voter history is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub proposal_id: ProposalId,
    pub voter: Address,
    /// Raw support code as emitted (0 = against, 1 = for, 2 = abstain).
    pub support: u8,
    pub weight: Uint,
    pub reason: String,
    /// Extra voting params, present only for `VoteCastWithParams`.
    pub params: Option<HexBytes>,
    pub block: BlockContext,
}

pub trait VoteStore {
    /// Insert or overwrite the record for `(record.proposal_id, record.voter)`.
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError>;

    fn get_vote(
        &self,
        proposal_id: &ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteRecord>, StoreError>;

    /// All vote records of one proposal, ordered by voter address.
    fn get_votes(&self, proposal_id: &ProposalId) -> Result<Vec<VoteRecord>, StoreError>;
}
