//! Decoded governor contract events.
//!
//! The indexer never talks to a chain directly. An upstream event source
//! decodes the governor's logs and hands them over as [`EventEnvelope`]s, in
//! block order, exactly once each. This crate is that hand-over contract.
//!
//! Every payload is a plain field copy of the corresponding Solidity event.

pub mod kind;

pub use kind::EventKind;

use serde::{Deserialize, Serialize};
use stele_types::{Address, BlockContext, HexBytes, LogId, ProposalId, Uint};

/// One decoded log together with the block it was emitted in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub block: BlockContext,
    pub log_index: u32,
    pub event: GovernorEvent,
}

impl EventEnvelope {
    pub fn log_id(&self) -> LogId {
        LogId::new(self.block.transaction_hash, self.log_index)
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}

/// Every event the governor contract emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorEvent {
    ProposalCreated(ProposalCreated),
    ProposalCanceled(ProposalCanceled),
    ProposalExecuted(ProposalExecuted),
    ProposalQueued(ProposalQueued),
    VoteCast(VoteCast),
    VoteCastWithParams(VoteCastWithParams),
    ProposalThresholdSet(ProposalThresholdSet),
    QuorumNumeratorUpdated(QuorumNumeratorUpdated),
    VotingDelaySet(VotingDelaySet),
    VotingPeriodSet(VotingPeriodSet),
    TimelockChange(TimelockChange),
}

impl GovernorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ProposalCreated(_) => EventKind::ProposalCreated,
            Self::ProposalCanceled(_) => EventKind::ProposalCanceled,
            Self::ProposalExecuted(_) => EventKind::ProposalExecuted,
            Self::ProposalQueued(_) => EventKind::ProposalQueued,
            Self::VoteCast(_) => EventKind::VoteCast,
            Self::VoteCastWithParams(_) => EventKind::VoteCastWithParams,
            Self::ProposalThresholdSet(_) => EventKind::ProposalThresholdSet,
            Self::QuorumNumeratorUpdated(_) => EventKind::QuorumNumeratorUpdated,
            Self::VotingDelaySet(_) => EventKind::VotingDelaySet,
            Self::VotingPeriodSet(_) => EventKind::VotingPeriodSet,
            Self::TimelockChange(_) => EventKind::TimelockChange,
        }
    }

    /// The proposal this event refers to, if any.
    pub fn proposal_id(&self) -> Option<&ProposalId> {
        match self {
            Self::ProposalCreated(e) => Some(&e.proposal_id),
            Self::ProposalCanceled(e) => Some(&e.proposal_id),
            Self::ProposalExecuted(e) => Some(&e.proposal_id),
            Self::ProposalQueued(e) => Some(&e.proposal_id),
            Self::VoteCast(e) => Some(&e.proposal_id),
            Self::VoteCastWithParams(e) => Some(&e.proposal_id),
            Self::ProposalThresholdSet(_)
            | Self::QuorumNumeratorUpdated(_)
            | Self::VotingDelaySet(_)
            | Self::VotingPeriodSet(_)
            | Self::TimelockChange(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCreated {
    pub proposal_id: ProposalId,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<Uint>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<HexBytes>,
    /// First block (or timepoint) at which votes are accepted.
    pub vote_start: Uint,
    /// Last block (or timepoint) at which votes are accepted.
    pub vote_end: Uint,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCanceled {
    pub proposal_id: ProposalId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalExecuted {
    pub proposal_id: ProposalId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalQueued {
    pub proposal_id: ProposalId,
    /// Earliest time the timelock allows execution.
    pub eta: Uint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCast {
    pub voter: Address,
    pub proposal_id: ProposalId,
    /// Raw support code as emitted. Not validated here.
    pub support: u8,
    pub weight: Uint,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCastWithParams {
    pub voter: Address,
    pub proposal_id: ProposalId,
    pub support: u8,
    pub weight: Uint,
    pub reason: String,
    pub params: HexBytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalThresholdSet {
    pub old_proposal_threshold: Uint,
    pub new_proposal_threshold: Uint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumNumeratorUpdated {
    pub old_quorum_numerator: Uint,
    pub new_quorum_numerator: Uint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingDelaySet {
    pub old_voting_delay: Uint,
    pub new_voting_delay: Uint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingPeriodSet {
    pub old_voting_period: Uint,
    pub new_voting_period: Uint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockChange {
    pub old_timelock: Address,
    pub new_timelock: Address,
}
