//! Pure state transitions of a [`ProposalVoteResult`].
//!
//! Nothing here touches storage; the aggregator loads, folds and saves.

use stele_store::ProposalVoteResult;
use stele_types::{Timestamp, Uint};

use crate::percent::percentage;
use crate::SupportCode;

/// How a vote event landed in the tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteApplied {
    /// Weight added to the bucket of this support code.
    Counted(SupportCode),
    /// Support code not recognized; no bucket changed.
    UnknownSupport(u8),
}

/// Fold one vote event into the tally.
///
/// The weight goes to the bucket selected by `support`. Whatever the code,
/// `voter_count` goes up by one, the total and percentages are recomputed
/// from the buckets, and the block stamp advances.
pub fn apply_vote(
    result: &mut ProposalVoteResult,
    support: u8,
    weight: &Uint,
    block_number: u64,
    block_timestamp: Timestamp,
) -> VoteApplied {
    let applied = match SupportCode::try_from(support) {
        Ok(SupportCode::Against) => {
            result.against_votes += weight;
            VoteApplied::Counted(SupportCode::Against)
        }
        Ok(SupportCode::For) => {
            result.for_votes += weight;
            VoteApplied::Counted(SupportCode::For)
        }
        Ok(SupportCode::Abstain) => {
            result.abstain_votes += weight;
            VoteApplied::Counted(SupportCode::Abstain)
        }
        Err(_) => VoteApplied::UnknownSupport(support),
    };

    result.voter_count += 1;
    recompute(result);
    stamp(result, block_number, block_timestamp);
    applied
}

/// Mark the tally final. Already-final tallies only get re-stamped.
pub fn finalize(result: &mut ProposalVoteResult, block_number: u64, block_timestamp: Timestamp) {
    result.is_finalized = true;
    stamp(result, block_number, block_timestamp);
}

/// Recompute `total_votes` and the three percentages from the buckets.
pub fn recompute(result: &mut ProposalVoteResult) {
    let total = &(&result.for_votes + &result.against_votes) + &result.abstain_votes;
    result.for_percentage = percentage(&result.for_votes, &total);
    result.against_percentage = percentage(&result.against_votes, &total);
    result.abstain_percentage = percentage(&result.abstain_votes, &total);
    result.total_votes = total;
}

fn stamp(result: &mut ProposalVoteResult, block_number: u64, block_timestamp: Timestamp) {
    result.last_updated_block = block_number;
    result.last_updated_timestamp = block_timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stele_types::ProposalId;

    fn fresh() -> ProposalVoteResult {
        ProposalVoteResult::new(ProposalId::from(1), 100, Timestamp::new(1000))
    }

    #[test]
    fn each_code_fills_its_own_bucket() {
        let mut r = fresh();
        assert_eq!(
            apply_vote(&mut r, 0, &Uint::from(1u64), 101, Timestamp::new(1001)),
            VoteApplied::Counted(SupportCode::Against)
        );
        apply_vote(&mut r, 1, &Uint::from(2u64), 102, Timestamp::new(1002));
        apply_vote(&mut r, 2, &Uint::from(5u64), 103, Timestamp::new(1003));

        assert_eq!(r.against_votes, Uint::from(1u64));
        assert_eq!(r.for_votes, Uint::from(2u64));
        assert_eq!(r.abstain_votes, Uint::from(5u64));
        assert_eq!(r.total_votes, Uint::from(8u64));
        assert_eq!(r.voter_count, 3);
        assert_eq!(r.abstain_percentage, Decimal::from_str_exact("62.5").unwrap());
        assert_eq!(r.last_updated_block, 103);
    }

    #[test]
    fn unknown_code_counts_but_adds_no_weight() {
        let mut r = fresh();
        apply_vote(&mut r, 1, &Uint::from(10u64), 101, Timestamp::new(1001));
        let applied = apply_vote(&mut r, 9, &Uint::from(1_000u64), 102, Timestamp::new(1002));

        assert_eq!(applied, VoteApplied::UnknownSupport(9));
        assert_eq!(r.total_votes, Uint::from(10u64));
        assert_eq!(r.voter_count, 2);
        assert_eq!(r.for_percentage, Decimal::ONE_HUNDRED);
        assert_eq!(r.last_updated_block, 102);
        assert_eq!(r.last_updated_timestamp, Timestamp::new(1002));
    }

    #[test]
    fn zero_weight_vote_leaves_percentages_zero() {
        let mut r = fresh();
        apply_vote(&mut r, 1, &Uint::zero(), 101, Timestamp::new(1001));
        assert!(r.total_votes.is_zero());
        assert_eq!(r.for_percentage, Decimal::ZERO);
        assert_eq!(r.voter_count, 1);
    }

    #[test]
    fn finalize_is_sticky_and_restamps() {
        let mut r = fresh();
        finalize(&mut r, 110, Timestamp::new(1100));
        finalize(&mut r, 120, Timestamp::new(1200));
        assert!(r.is_finalized);
        assert_eq!(r.last_updated_block, 120);
    }
}
