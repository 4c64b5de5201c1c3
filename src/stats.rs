//! Shared statistics mutated by the decision core.
//!
//! One `GlobalStats` is owned by the surrounding engine and passed by
//! mutable reference into every decision call; there is no ambient global
//! state. All counters are cumulative over the process lifetime.

use serde::Serialize;

/// Cumulative counters, accumulators, and histograms.
///
/// `queries` is monotonically non-decreasing; budget checks always compare
/// against the current (possibly doubled) threshold, never a snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobalStats {
    /// Total label queries granted.
    pub queries: u64,

    /// Weighted example count at the most recent processed example.
    pub n_processed: f64,

    /// Examples that fell inside the disagreement region.
    pub n_in_dis: u64,

    /// Oracular mode: self-labels that disagreed with the true label,
    /// among examples outside the disagreement region.
    pub sum_error_not_in_dis: u64,

    /// Cumulative training loss, maintained by the engine's loss
    /// accounting.
    pub sum_loss: f64,

    /// Weighted example count carried over from a resumed run.
    pub initial_t: f64,

    /// Cumulative weighted example count.
    pub weighted_examples: f64,

    /// Cumulative `label * weight` over labeled examples.
    pub weighted_labels: f64,

    /// Cumulative weight of unlabeled examples.
    pub weighted_unlabeled_examples: f64,

    /// Smallest label seen, maintained by the engine.
    pub min_label: f32,

    /// Largest label seen, maintained by the engine.
    pub max_label: f32,

    /// Histogram: `examples_by_queries[q]` counts examples for which `q`
    /// labels were queried.
    pub examples_by_queries: Vec<u64>,

    /// Classes whose range overlapped the best achievable cost while
    /// already narrow.
    pub overlapped_and_range_small: u64,

    /// Observed costs that fell outside their predicted range.
    pub labels_outside_range: u64,

    /// Total distance from out-of-range costs to their predicted range.
    pub distance_to_range: f64,

    /// Total width of the ranges that were missed.
    pub range: f64,
}

impl GlobalStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty statistics with the query histogram sized for
    /// `num_classes` (buckets `0..=num_classes`).
    pub fn with_classes(num_classes: u32) -> Self {
        Self {
            examples_by_queries: vec![0; num_classes as usize + 1],
            ..Self::default()
        }
    }

    /// Record that the current example had `queried` labels queried.
    pub(crate) fn record_example_queries(&mut self, queried: usize) {
        if self.examples_by_queries.len() <= queried {
            self.examples_by_queries.resize(queried + 1, 0);
        }
        self.examples_by_queries[queried] += 1;
    }

    /// Mean distance from out-of-range costs to their predicted range,
    /// or 0 when every cost fell inside.
    pub fn mean_distance_to_range(&self) -> f64 {
        if self.labels_outside_range == 0 {
            0.0
        } else {
            self.distance_to_range / self.labels_outside_range as f64
        }
    }

    /// Mean width of the ranges that were missed, or 0 when every cost
    /// fell inside.
    pub fn mean_range(&self) -> f64 {
        if self.labels_outside_range == 0 {
            0.0
        } else {
            self.range / self.labels_outside_range as f64
        }
    }
}
