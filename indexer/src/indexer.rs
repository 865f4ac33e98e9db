//! Sequential replay loop.

use std::sync::Arc;

use stele_governance::CreationPolicy;
use stele_store::IndexStore;

use crate::{EventHandler, EventSource, IndexerError, IndexerMetrics};

/// What a completed run went through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: u64,
    pub first_block: Option<u64>,
    pub last_block: Option<u64>,
}

pub struct Indexer<S> {
    handler: EventHandler<S>,
}

impl<S: IndexStore> Indexer<S> {
    pub fn new(store: Arc<S>, policy: CreationPolicy, metrics: Arc<IndexerMetrics>) -> Self {
        Self {
            handler: EventHandler::new(store, policy, metrics),
        }
    }

    pub fn handler(&self) -> &EventHandler<S> {
        &self.handler
    }

    pub fn store(&self) -> &Arc<S> {
        self.handler.store()
    }

    pub fn metrics(&self) -> &Arc<IndexerMetrics> {
        self.handler.metrics()
    }

    /// Drain `source`, handling each event in turn.
    ///
    /// Stops at the first failing event; everything before it stays
    /// committed.
    pub fn run<E: EventSource>(&self, source: &mut E) -> Result<RunSummary, IndexerError> {
        let mut summary = RunSummary::default();

        while let Some(envelope) = source.next_event()? {
            let number = envelope.block.number;
            if let Some(last) = summary.last_block {
                if number < last {
                    tracing::warn!(
                        block = number,
                        previous = last,
                        log = %envelope.log_id(),
                        "event out of block order"
                    );
                }
            }

            self.handler.handle(&envelope)?;

            summary.events += 1;
            summary.first_block.get_or_insert(number);
            summary.last_block = Some(number);
        }

        tracing::info!(
            events = summary.events,
            first_block = ?summary.first_block,
            last_block = ?summary.last_block,
            "replay finished"
        );
        Ok(summary)
    }
}
