//! Vote aggregation for governor proposals.
//!
//! Each proposal carries one [`ProposalVoteResult`](stele_store::ProposalVoteResult)
//! that is folded forward, one vote event at a time, without ever re-reading
//! earlier votes:
//!
//! created → (vote)* → finalized (on cancel or execute)
//!
//! Weights are unbounded integers. Percentages are decimal, never binary
//! floating point, so repeated small updates do not drift.
//!
//! Counting quirks kept on purpose:
//! - `voter_count` counts vote events, so a revote counts twice and its
//!   weight is added again.
//! - Votes with an unrecognized support code touch no bucket but still count.
//! - Votes arriving after finalization are still folded in.

pub mod aggregator;
pub mod error;
pub mod fold;
pub mod percent;
pub mod support;

pub use aggregator::{CreateOutcome, CreationPolicy, FinalizeOutcome, VoteAggregator, VoteOutcome};
pub use error::GovernanceError;
pub use fold::VoteApplied;
pub use percent::percentage;
pub use support::SupportCode;
