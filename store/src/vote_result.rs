//! Per-proposal vote tally storage.

use crate::StoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stele_types::{ProposalId, Timestamp, Uint};

/// Running vote tally of one proposal.
///
/// Maintained incrementally, one update per vote event. Invariants kept by
/// the aggregator:
/// - `total_votes == for_votes + against_votes + abstain_votes`
/// - every percentage is zero while `total_votes` is zero
/// - `is_finalized` never goes back to `false`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVoteResult {
    pub proposal_id: ProposalId,
    pub for_votes: Uint,
    pub against_votes: Uint,
    pub abstain_votes: Uint,
    pub total_votes: Uint,
    /// Number of vote events counted, including revotes and votes with an
    /// unrecognized support code.
    pub voter_count: u64,
    pub for_percentage: Decimal,
    pub against_percentage: Decimal,
    pub abstain_percentage: Decimal,
    pub last_updated_block: u64,
    pub last_updated_timestamp: Timestamp,
    pub is_finalized: bool,
}

impl ProposalVoteResult {
    /// A zeroed tally stamped with the given block.
    pub fn new(proposal_id: ProposalId, block_number: u64, block_timestamp: Timestamp) -> Self {
        Self {
            proposal_id,
            for_votes: Uint::zero(),
            against_votes: Uint::zero(),
            abstain_votes: Uint::zero(),
            total_votes: Uint::zero(),
            voter_count: 0,
            for_percentage: Decimal::ZERO,
            against_percentage: Decimal::ZERO,
            abstain_percentage: Decimal::ZERO,
            last_updated_block: block_number,
            last_updated_timestamp: block_timestamp,
            is_finalized: false,
        }
    }
}

/// Keyed by the proposal id's decimal string.
pub trait VoteResultStore {
    fn get_vote_result(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalVoteResult>, StoreError>;

    /// Insert or overwrite the tally for `result.proposal_id`.
    fn put_vote_result(&self, result: &ProposalVoteResult) -> Result<(), StoreError>;
}
