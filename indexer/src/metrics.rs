//! Prometheus metrics for the indexer.
//!
//! [`IndexerMetrics`] owns a dedicated [`Registry`]; [`IndexerMetrics::encode`]
//! renders it in the Prometheus text exposition format, suitable for a
//! node_exporter textfile collector.

use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, Histogram,
    HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use stele_events::EventKind;
use stele_governance::SupportCode;

pub struct IndexerMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Events handled successfully, labelled by event kind.
    pub events_processed: IntCounterVec,
    /// Votes whose weight went into a bucket, labelled by support.
    pub votes_counted: IntCounterVec,
    /// Votes skipped from bucket accounting for an unrecognized support code.
    pub votes_unknown_support: IntCounter,
    /// Votes folded into a tally that was already finalized.
    pub votes_after_finalization: IntCounter,
    /// Tallies created by a vote because no creation event was seen.
    pub tallies_lazily_created: IntCounter,
    /// Creation events for a proposal that already had a tally.
    pub duplicate_creations: IntCounter,
    /// Tallies that transitioned to finalized.
    pub proposals_finalized: IntCounter,
    /// Events whose processing failed.
    pub handler_failures: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Block number of the last successfully handled event.
    pub last_block: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time spent handling one event, in milliseconds.
    pub handle_time_ms: Histogram,
}

impl IndexerMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let events_processed = register_int_counter_vec_with_registry!(
            Opts::new(
                "stele_events_processed_total",
                "Governor events handled by the indexer"
            ),
            &["event"],
            registry
        )
        .expect("failed to register events_processed counter");

        let votes_counted = register_int_counter_vec_with_registry!(
            Opts::new(
                "stele_votes_counted_total",
                "Votes added to a tally bucket"
            ),
            &["support"],
            registry
        )
        .expect("failed to register votes_counted counter");

        let votes_unknown_support = register_int_counter_with_registry!(
            Opts::new(
                "stele_votes_unknown_support_total",
                "Votes with an unrecognized support code"
            ),
            registry
        )
        .expect("failed to register votes_unknown_support counter");

        let votes_after_finalization = register_int_counter_with_registry!(
            Opts::new(
                "stele_votes_after_finalization_total",
                "Votes counted into an already finalized tally"
            ),
            registry
        )
        .expect("failed to register votes_after_finalization counter");

        let tallies_lazily_created = register_int_counter_with_registry!(
            Opts::new(
                "stele_tallies_lazily_created_total",
                "Tallies created by a vote without a prior creation event"
            ),
            registry
        )
        .expect("failed to register tallies_lazily_created counter");

        let duplicate_creations = register_int_counter_with_registry!(
            Opts::new(
                "stele_duplicate_creations_total",
                "Creation events for proposals that already had a tally"
            ),
            registry
        )
        .expect("failed to register duplicate_creations counter");

        let proposals_finalized = register_int_counter_with_registry!(
            Opts::new(
                "stele_proposals_finalized_total",
                "Proposal tallies marked finalized"
            ),
            registry
        )
        .expect("failed to register proposals_finalized counter");

        let handler_failures = register_int_counter_with_registry!(
            Opts::new(
                "stele_handler_failures_total",
                "Events whose processing failed"
            ),
            registry
        )
        .expect("failed to register handler_failures counter");

        let last_block = register_int_gauge_with_registry!(
            Opts::new(
                "stele_last_block",
                "Block number of the last handled event"
            ),
            registry
        )
        .expect("failed to register last_block gauge");

        // 0.05 ms → ~100 ms
        let handle_time_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "stele_handle_time_ms",
                "Per-event handling time in milliseconds"
            )
            .buckets(
                prometheus::exponential_buckets(0.05, 2.0, 12)
                    .expect("valid histogram buckets")
            ),
            registry
        )
        .expect("failed to register handle_time_ms histogram");

        // Pre-create label values so every series shows up at zero.
        for kind in EventKind::ALL {
            events_processed.with_label_values(&[kind.as_str()]);
        }
        for code in SupportCode::ALL {
            votes_counted.with_label_values(&[code.as_str()]);
        }

        Self {
            registry,
            events_processed,
            votes_counted,
            votes_unknown_support,
            votes_after_finalization,
            tallies_lazily_created,
            duplicate_creations,
            proposals_finalized,
            handler_failures,
            last_block,
            handle_time_ms,
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::warn!(error = %e, "failed to encode metrics");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for IndexerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_lists_every_series() {
        let metrics = IndexerMetrics::new();
        metrics
            .events_processed
            .with_label_values(&[EventKind::VoteCast.as_str()])
            .inc();
        metrics.last_block.set(42);

        let text = metrics.encode();
        assert!(text.contains("stele_events_processed_total{event=\"vote_cast\"} 1"));
        assert!(text.contains("stele_events_processed_total{event=\"timelock_change\"} 0"));
        assert!(text.contains("stele_votes_counted_total{support=\"abstain\"} 0"));
        assert!(text.contains("stele_last_block 42"));
    }
}
