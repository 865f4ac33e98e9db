//! Store-backed vote aggregator.
//!
//! [`VoteAggregator`] is invoked once per lifecycle or vote event, in block
//! order, and does O(1) work per event: one read and at most one write of a
//! single [`ProposalVoteResult`]. Duplicated deliveries are not detected;
//! a replayed vote is counted again.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stele_store::{ProposalVoteResult, VoteResultStore};
use stele_types::{ProposalId, Timestamp, Uint};

use crate::fold::{self, VoteApplied};
use crate::GovernanceError;

/// What to do when a creation event arrives for a proposal that already
/// has a tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Overwrite with a zeroed tally, discarding counted votes.
    #[default]
    Reset,
    /// Leave the existing tally untouched (create-if-absent).
    KeepExisting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A tally existed and was overwritten with zeros.
    Reset,
    /// A tally existed and was left as is.
    KeptExisting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    pub applied: VoteApplied,
    /// No tally existed; a zeroed one was created for this vote.
    pub lazily_created: bool,
    /// The tally was already final before this vote.
    pub after_finalization: bool,
    /// The tally as persisted.
    pub result: ProposalVoteResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Finalized,
    /// Was already final; only the block stamp moved.
    AlreadyFinalized,
    /// No tally exists; nothing was written.
    Missing,
}

pub struct VoteAggregator<S> {
    store: Arc<S>,
    policy: CreationPolicy,
}

impl<S: VoteResultStore> VoteAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, CreationPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: CreationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> CreationPolicy {
        self.policy
    }

    /// Start a zeroed tally for a newly created proposal.
    pub fn on_proposal_created(
        &self,
        proposal_id: &ProposalId,
        block_number: u64,
        block_timestamp: Timestamp,
    ) -> Result<CreateOutcome, GovernanceError> {
        let existing = self.store.get_vote_result(proposal_id)?;

        let outcome = match (existing, self.policy) {
            (None, _) => CreateOutcome::Created,
            (Some(_), CreationPolicy::KeepExisting) => {
                tracing::warn!(
                    proposal = %proposal_id,
                    block = block_number,
                    "duplicate proposal creation, keeping existing tally"
                );
                return Ok(CreateOutcome::KeptExisting);
            }
            (Some(prev), CreationPolicy::Reset) => {
                tracing::warn!(
                    proposal = %proposal_id,
                    block = block_number,
                    discarded_votes = prev.voter_count,
                    "duplicate proposal creation, resetting tally"
                );
                CreateOutcome::Reset
            }
        };

        let result = ProposalVoteResult::new(proposal_id.clone(), block_number, block_timestamp);
        self.store.put_vote_result(&result)?;
        tracing::debug!(proposal = %proposal_id, block = block_number, "tally created");
        Ok(outcome)
    }

    /// Fold one vote event into the proposal's tally.
    pub fn on_vote_cast(
        &self,
        proposal_id: &ProposalId,
        support: u8,
        weight: &Uint,
        block_number: u64,
        block_timestamp: Timestamp,
    ) -> Result<VoteOutcome, GovernanceError> {
        let (mut result, lazily_created) = match self.store.get_vote_result(proposal_id)? {
            Some(result) => (result, false),
            None => {
                tracing::warn!(
                    proposal = %proposal_id,
                    block = block_number,
                    "vote for proposal without tally, creating one"
                );
                (
                    ProposalVoteResult::new(proposal_id.clone(), block_number, block_timestamp),
                    true,
                )
            }
        };

        let after_finalization = result.is_finalized;
        if after_finalization {
            tracing::warn!(
                proposal = %proposal_id,
                block = block_number,
                "vote counted after proposal was finalized"
            );
        }

        let applied = fold::apply_vote(
            &mut result,
            support,
            weight,
            block_number,
            block_timestamp,
        );
        match applied {
            VoteApplied::Counted(code) => tracing::debug!(
                proposal = %proposal_id,
                support = %code,
                weight = %weight,
                total = %result.total_votes,
                voters = result.voter_count,
                "vote counted"
            ),
            VoteApplied::UnknownSupport(raw) => tracing::warn!(
                proposal = %proposal_id,
                support = raw,
                weight = %weight,
                "unrecognized support code, weight not counted"
            ),
        }

        self.store.put_vote_result(&result)?;
        Ok(VoteOutcome {
            applied,
            lazily_created,
            after_finalization,
            result,
        })
    }

    /// Mark the tally final on cancellation or execution.
    ///
    /// A proposal without a tally is left alone rather than created just to
    /// be finalized.
    pub fn on_finalizing_event(
        &self,
        proposal_id: &ProposalId,
        block_number: u64,
        block_timestamp: Timestamp,
    ) -> Result<FinalizeOutcome, GovernanceError> {
        let Some(mut result) = self.store.get_vote_result(proposal_id)? else {
            tracing::debug!(proposal = %proposal_id, "finalizing event without tally, ignored");
            return Ok(FinalizeOutcome::Missing);
        };

        let outcome = if result.is_finalized {
            FinalizeOutcome::AlreadyFinalized
        } else {
            FinalizeOutcome::Finalized
        };
        fold::finalize(&mut result, block_number, block_timestamp);
        self.store.put_vote_result(&result)?;

        if outcome == FinalizeOutcome::Finalized {
            tracing::info!(
                proposal = %proposal_id,
                block = block_number,
                total = %result.total_votes,
                voters = result.voter_count,
                "tally finalized"
            );
        }
        Ok(outcome)
    }

    /// Current tally of a proposal, if any.
    pub fn tally(&self, proposal_id: &ProposalId) -> Result<Option<ProposalVoteResult>, GovernanceError> {
        Ok(self.store.get_vote_result(proposal_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stele_nullables::NullStore;
    use stele_store::StoreError;

    use crate::SupportCode;

    fn aggregator() -> (Arc<NullStore>, VoteAggregator<NullStore>) {
        let store = Arc::new(NullStore::new());
        (store.clone(), VoteAggregator::new(store))
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn full_proposal_scenario() {
        let (_store, agg) = aggregator();
        let p1 = ProposalId::from(1);

        assert_eq!(
            agg.on_proposal_created(&p1, 100, ts(1000)).unwrap(),
            CreateOutcome::Created
        );
        let r = agg.tally(&p1).unwrap().unwrap();
        assert!(r.for_votes.is_zero() && r.against_votes.is_zero() && r.abstain_votes.is_zero());
        assert!(r.total_votes.is_zero());
        assert_eq!(r.voter_count, 0);
        assert!(!r.is_finalized);

        let out = agg
            .on_vote_cast(&p1, 1, &Uint::from(300u64), 101, ts(1001))
            .unwrap();
        assert_eq!(out.applied, VoteApplied::Counted(SupportCode::For));
        assert!(!out.lazily_created);
        let r = out.result;
        assert_eq!(r.for_votes, Uint::from(300u64));
        assert_eq!(r.total_votes, Uint::from(300u64));
        assert_eq!(r.voter_count, 1);
        assert_eq!(r.for_percentage, Decimal::ONE_HUNDRED);
        assert_eq!(r.against_percentage, Decimal::ZERO);
        assert_eq!(r.abstain_percentage, Decimal::ZERO);

        let r = agg
            .on_vote_cast(&p1, 0, &Uint::from(100u64), 102, ts(1002))
            .unwrap()
            .result;
        assert_eq!(r.for_votes, Uint::from(300u64));
        assert_eq!(r.against_votes, Uint::from(100u64));
        assert_eq!(r.total_votes, Uint::from(400u64));
        assert_eq!(r.voter_count, 2);
        assert_eq!(r.for_percentage, Decimal::from(75));
        assert_eq!(r.against_percentage, Decimal::from(25));
        assert_eq!(r.abstain_percentage, Decimal::ZERO);

        assert_eq!(
            agg.on_finalizing_event(&p1, 103, ts(1003)).unwrap(),
            FinalizeOutcome::Finalized
        );
        let finalized = agg.tally(&p1).unwrap().unwrap();
        assert!(finalized.is_finalized);
        assert_eq!(finalized.total_votes, r.total_votes);
        assert_eq!(finalized.voter_count, 2);
        assert_eq!(finalized.last_updated_block, 103);
        assert_eq!(finalized.last_updated_timestamp, ts(1003));
    }

    #[test]
    fn vote_on_unknown_proposal_creates_tally() {
        let (_store, agg) = aggregator();
        let p2 = ProposalId::from(2);

        let out = agg
            .on_vote_cast(&p2, 2, &Uint::from(42u64), 50, ts(500))
            .unwrap();
        assert!(out.lazily_created);
        assert_eq!(out.result.abstain_votes, Uint::from(42u64));
        assert_eq!(out.result.total_votes, Uint::from(42u64));
        assert_eq!(out.result.voter_count, 1);
        assert_eq!(agg.tally(&p2).unwrap(), Some(out.result));
    }

    #[test]
    fn duplicate_creation_resets_by_default() {
        let (_store, agg) = aggregator();
        let p = ProposalId::from(7);
        agg.on_proposal_created(&p, 100, ts(1000)).unwrap();
        agg.on_vote_cast(&p, 1, &Uint::from(300u64), 101, ts(1001))
            .unwrap();

        assert_eq!(
            agg.on_proposal_created(&p, 105, ts(1005)).unwrap(),
            CreateOutcome::Reset
        );
        let r = agg.tally(&p).unwrap().unwrap();
        assert!(r.total_votes.is_zero());
        assert_eq!(r.voter_count, 0);
        assert_eq!(r.last_updated_block, 105);
    }

    #[test]
    fn duplicate_creation_can_keep_existing() {
        let store = Arc::new(NullStore::new());
        let agg = VoteAggregator::with_policy(store.clone(), CreationPolicy::KeepExisting);
        let p = ProposalId::from(7);
        agg.on_proposal_created(&p, 100, ts(1000)).unwrap();
        agg.on_vote_cast(&p, 1, &Uint::from(300u64), 101, ts(1001))
            .unwrap();
        let writes = store.write_count();

        assert_eq!(
            agg.on_proposal_created(&p, 105, ts(1005)).unwrap(),
            CreateOutcome::KeptExisting
        );
        assert_eq!(store.write_count(), writes);
        let r = agg.tally(&p).unwrap().unwrap();
        assert_eq!(r.total_votes, Uint::from(300u64));
        assert_eq!(r.voter_count, 1);
    }

    #[test]
    fn finalizing_missing_proposal_writes_nothing() {
        let (store, agg) = aggregator();
        let p = ProposalId::from(3);
        assert_eq!(
            agg.on_finalizing_event(&p, 10, ts(100)).unwrap(),
            FinalizeOutcome::Missing
        );
        assert!(agg.tally(&p).unwrap().is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn second_finalization_only_restamps() {
        let (_store, agg) = aggregator();
        let p = ProposalId::from(4);
        agg.on_proposal_created(&p, 1, ts(10)).unwrap();
        agg.on_finalizing_event(&p, 2, ts(20)).unwrap();
        assert_eq!(
            agg.on_finalizing_event(&p, 3, ts(30)).unwrap(),
            FinalizeOutcome::AlreadyFinalized
        );
        let r = agg.tally(&p).unwrap().unwrap();
        assert!(r.is_finalized);
        assert_eq!(r.last_updated_block, 3);
    }

    #[test]
    fn vote_after_finalization_is_still_counted() {
        let (_store, agg) = aggregator();
        let p = ProposalId::from(5);
        agg.on_proposal_created(&p, 1, ts(10)).unwrap();
        agg.on_finalizing_event(&p, 2, ts(20)).unwrap();

        let out = agg
            .on_vote_cast(&p, 1, &Uint::from(9u64), 3, ts(30))
            .unwrap();
        assert!(out.after_finalization);
        assert!(out.result.is_finalized);
        assert_eq!(out.result.for_votes, Uint::from(9u64));
    }

    #[test]
    fn unknown_support_is_reported() {
        let (_store, agg) = aggregator();
        let p = ProposalId::from(6);
        agg.on_proposal_created(&p, 1, ts(10)).unwrap();
        let out = agg
            .on_vote_cast(&p, 3, &Uint::from(9u64), 2, ts(20))
            .unwrap();
        assert_eq!(out.applied, VoteApplied::UnknownSupport(3));
        assert_eq!(out.result.voter_count, 1);
        assert!(out.result.total_votes.is_zero());
        assert_eq!(out.result.last_updated_block, 2);
    }

    #[test]
    fn store_failure_propagates() {
        let (store, agg) = aggregator();
        let p = ProposalId::from(8);
        agg.on_proposal_created(&p, 1, ts(10)).unwrap();
        store.fail_writes(true);

        let err = agg
            .on_vote_cast(&p, 1, &Uint::from(1u64), 2, ts(20))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Store(StoreError::Backend(_))));

        store.fail_writes(false);
        let r = agg.tally(&p).unwrap().unwrap();
        assert_eq!(r.voter_count, 0);
    }
}
