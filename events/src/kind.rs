//! Fieldless discriminant of [`GovernorEvent`](crate::GovernorEvent), used
//! for metric labels and log fields.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProposalCreated,
    ProposalCanceled,
    ProposalExecuted,
    ProposalQueued,
    VoteCast,
    VoteCastWithParams,
    ProposalThresholdSet,
    QuorumNumeratorUpdated,
    VotingDelaySet,
    VotingPeriodSet,
    TimelockChange,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        Self::ProposalCreated,
        Self::ProposalCanceled,
        Self::ProposalExecuted,
        Self::ProposalQueued,
        Self::VoteCast,
        Self::VoteCastWithParams,
        Self::ProposalThresholdSet,
        Self::QuorumNumeratorUpdated,
        Self::VotingDelaySet,
        Self::VotingPeriodSet,
        Self::TimelockChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProposalCreated => "proposal_created",
            Self::ProposalCanceled => "proposal_canceled",
            Self::ProposalExecuted => "proposal_executed",
            Self::ProposalQueued => "proposal_queued",
            Self::VoteCast => "vote_cast",
            Self::VoteCastWithParams => "vote_cast_with_params",
            Self::ProposalThresholdSet => "proposal_threshold_set",
            Self::QuorumNumeratorUpdated => "quorum_numerator_updated",
            Self::VotingDelaySet => "voting_delay_set",
            Self::VotingPeriodSet => "voting_period_set",
            Self::TimelockChange => "timelock_change",
        }
    }

    /// Whether the event ends a proposal's voting life.
    pub fn is_finalizing(&self) -> bool {
        matches!(self, Self::ProposalCanceled | Self::ProposalExecuted)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
