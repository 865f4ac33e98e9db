//! Per-event dispatch.

use std::sync::Arc;
use std::time::Instant;

use stele_events::{EventEnvelope, GovernorEvent};
use stele_governance::{
    CreateOutcome, CreationPolicy, FinalizeOutcome, VoteAggregator, VoteApplied,
};
use stele_store::{
    EventLogEntry, GovernorSettings, IndexStore, ProposalStatus, ProposalStatusRecord,
    VoteRecord,
};
use stele_types::{Address, BlockContext, HexBytes, ProposalId, Uint};

use crate::{IndexerError, IndexerMetrics};

/// Fields shared by `VoteCast` and `VoteCastWithParams`.
struct Vote<'a> {
    voter: &'a Address,
    proposal_id: &'a ProposalId,
    support: u8,
    weight: &'a Uint,
    reason: &'a str,
    params: Option<&'a HexBytes>,
}

/// Turns one decoded event into store writes.
///
/// The immutable log entry is written first, then the derived records. Each
/// write is atomic on its own; a failure part-way leaves earlier writes of
/// the same event in place and is reported to the caller.
pub struct EventHandler<S> {
    store: Arc<S>,
    aggregator: VoteAggregator<S>,
    metrics: Arc<IndexerMetrics>,
}

impl<S: IndexStore> EventHandler<S> {
    pub fn new(store: Arc<S>, policy: CreationPolicy, metrics: Arc<IndexerMetrics>) -> Self {
        let aggregator = VoteAggregator::with_policy(store.clone(), policy);
        Self {
            store,
            aggregator,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<IndexerMetrics> {
        &self.metrics
    }

    pub fn handle(&self, envelope: &EventEnvelope) -> Result<(), IndexerError> {
        let started = Instant::now();
        let kind = envelope.kind();

        if let Err(e) = self.dispatch(envelope) {
            self.metrics.handler_failures.inc();
            tracing::error!(
                event = %kind,
                log = %envelope.log_id(),
                block = envelope.block.number,
                error = %e,
                "failed to handle event"
            );
            return Err(e);
        }

        self.metrics
            .events_processed
            .with_label_values(&[kind.as_str()])
            .inc();
        self.metrics
            .last_block
            .set(i64::try_from(envelope.block.number).unwrap_or(i64::MAX));
        self.metrics
            .handle_time_ms
            .observe(started.elapsed().as_secs_f64() * 1000.0);
        tracing::trace!(event = %kind, log = %envelope.log_id(), "event handled");
        Ok(())
    }

    fn dispatch(&self, envelope: &EventEnvelope) -> Result<(), IndexerError> {
        self.store
            .put_log_entry(&EventLogEntry::from_envelope(envelope))?;

        let block = &envelope.block;
        match &envelope.event {
            GovernorEvent::ProposalCreated(e) => {
                let outcome = self.aggregator.on_proposal_created(
                    &e.proposal_id,
                    block.number,
                    block.timestamp,
                )?;
                if outcome != CreateOutcome::Created {
                    self.metrics.duplicate_creations.inc();
                }
                if outcome != CreateOutcome::KeptExisting {
                    self.set_status(&e.proposal_id, ProposalStatus::Pending, block)?;
                }
                tracing::info!(
                    proposal = %e.proposal_id,
                    proposer = %e.proposer,
                    block = block.number,
                    "proposal created"
                );
            }
            GovernorEvent::ProposalCanceled(e) => {
                self.finalize(&e.proposal_id, block)?;
                self.set_status(&e.proposal_id, ProposalStatus::Canceled, block)?;
            }
            GovernorEvent::ProposalExecuted(e) => {
                self.finalize(&e.proposal_id, block)?;
                self.set_status(&e.proposal_id, ProposalStatus::Executed, block)?;
            }
            GovernorEvent::ProposalQueued(e) => {
                self.set_status(
                    &e.proposal_id,
                    ProposalStatus::Queued { eta: e.eta.clone() },
                    block,
                )?;
            }
            GovernorEvent::VoteCast(e) => self.record_vote(
                Vote {
                    voter: &e.voter,
                    proposal_id: &e.proposal_id,
                    support: e.support,
                    weight: &e.weight,
                    reason: &e.reason,
                    params: None,
                },
                block,
            )?,
            GovernorEvent::VoteCastWithParams(e) => self.record_vote(
                Vote {
                    voter: &e.voter,
                    proposal_id: &e.proposal_id,
                    support: e.support,
                    weight: &e.weight,
                    reason: &e.reason,
                    params: Some(&e.params),
                },
                block,
            )?,
            GovernorEvent::ProposalThresholdSet(e) => self.update_settings(block, |s| {
                s.proposal_threshold = Some(e.new_proposal_threshold.clone())
            })?,
            GovernorEvent::QuorumNumeratorUpdated(e) => self.update_settings(block, |s| {
                s.quorum_numerator = Some(e.new_quorum_numerator.clone())
            })?,
            GovernorEvent::VotingDelaySet(e) => self.update_settings(block, |s| {
                s.voting_delay = Some(e.new_voting_delay.clone())
            })?,
            GovernorEvent::VotingPeriodSet(e) => self.update_settings(block, |s| {
                s.voting_period = Some(e.new_voting_period.clone())
            })?,
            GovernorEvent::TimelockChange(e) => {
                self.update_settings(block, |s| s.timelock = Some(e.new_timelock))?
            }
        }
        Ok(())
    }

    fn record_vote(&self, vote: Vote<'_>, block: &BlockContext) -> Result<(), IndexerError> {
        self.store.put_vote(&VoteRecord {
            proposal_id: vote.proposal_id.clone(),
            voter: *vote.voter,
            support: vote.support,
            weight: vote.weight.clone(),
            reason: vote.reason.to_string(),
            params: vote.params.cloned(),
            block: *block,
        })?;

        let outcome = self.aggregator.on_vote_cast(
            vote.proposal_id,
            vote.support,
            vote.weight,
            block.number,
            block.timestamp,
        )?;

        match outcome.applied {
            VoteApplied::Counted(code) => self
                .metrics
                .votes_counted
                .with_label_values(&[code.as_str()])
                .inc(),
            VoteApplied::UnknownSupport(_) => self.metrics.votes_unknown_support.inc(),
        }
        if outcome.lazily_created {
            self.metrics.tallies_lazily_created.inc();
        }
        if outcome.after_finalization {
            self.metrics.votes_after_finalization.inc();
        }
        Ok(())
    }

    fn finalize(&self, proposal_id: &ProposalId, block: &BlockContext) -> Result<(), IndexerError> {
        let outcome = self
            .aggregator
            .on_finalizing_event(proposal_id, block.number, block.timestamp)?;
        if outcome == FinalizeOutcome::Finalized {
            self.metrics.proposals_finalized.inc();
        }
        Ok(())
    }

    fn set_status(
        &self,
        proposal_id: &ProposalId,
        status: ProposalStatus,
        block: &BlockContext,
    ) -> Result<(), IndexerError> {
        tracing::debug!(proposal = %proposal_id, status = status.as_str(), "proposal status");
        self.store.put_status(&ProposalStatusRecord {
            proposal_id: proposal_id.clone(),
            status,
            updated_block: block.number,
            updated_timestamp: block.timestamp,
        })?;
        Ok(())
    }

    fn update_settings(
        &self,
        block: &BlockContext,
        apply: impl FnOnce(&mut GovernorSettings),
    ) -> Result<(), IndexerError> {
        let mut settings = self.store.get_settings()?.unwrap_or_default();
        apply(&mut settings);
        settings.last_updated_block = block.number;
        settings.last_updated_timestamp = block.timestamp;
        self.store.put_settings(&settings)?;
        tracing::info!(block = block.number, "governor settings updated");
        Ok(())
    }
}
