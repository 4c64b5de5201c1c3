//! Structured diagnostic events and the sinks that receive them.
//!
//! The decision algorithms never write to the console; every diagnostic
//! observation is an event handed to a [`DecisionSink`] chosen at
//! construction. [`TracingSink`] forwards events to the `tracing`
//! subscriber; [`NullSink`] discards them. Sinks are observability only —
//! no decision depends on what a sink does.

use serde::Serialize;

/// One binary query decision.
#[derive(Debug, Clone, Serialize)]
pub struct QueryDecision {
    /// Round count at decision time.
    pub k: f32,
    /// Prediction margin scaled by sensitivity.
    pub confidence: f32,
    /// Query probability.
    pub bias: f32,
    /// Whether the coin flip granted a query.
    pub queried: bool,
    /// Importance weight granted, if any.
    pub importance: Option<f32>,
}

/// Per-class confidence interval for a predicted cost.
#[derive(Debug, Clone, Serialize)]
pub struct RangeEstimate {
    /// Class index.
    pub class: u32,
    /// Sensitivity reported by the base learner.
    pub sensitivity: f32,
    /// Adaptive width threshold `eta(t)`.
    pub eta: f32,
    /// Lower confidence bound.
    pub min_pred: f32,
    /// Upper confidence bound.
    pub max_pred: f32,
    /// The bound degraded to the full declared range (first round or
    /// degenerate sensitivity).
    pub fallback: bool,
}

/// One inner-loop step of the cost-sensitive decision.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDecision {
    /// Class index.
    pub class: u32,
    /// Observed cost, if known.
    pub cost: Option<f32>,
    /// Running argmin class after this step.
    pub prediction: u32,
    /// Running best partial prediction after this step.
    pub score: f32,
    /// This class's partial prediction.
    pub partial_prediction: f32,
    /// Whether this class's label was selected for querying.
    pub query_label: bool,
    /// Reduction mode: whether the outer layer should reveal this cost.
    pub query_needed: bool,
    /// Whether the range overlapped the best achievable cost.
    pub overlapped: bool,
    /// Whether the range was wider than `eta(t)`.
    pub range_large: bool,
    /// Lower confidence bound.
    pub min_pred: f32,
    /// Upper confidence bound.
    pub max_pred: f32,
    /// Overlapping classes for this example.
    pub n_overlapped: u32,
    /// Baseline policy in effect.
    pub baseline: bool,
}

/// A model checkpoint was written.
#[derive(Debug, Clone, Serialize)]
pub struct CheckpointSaved {
    /// Path the model was saved to.
    pub path: String,
    /// Cumulative queries at checkpoint time.
    pub queries: u64,
}

/// Budget diagnostics emitted alongside a cost-sensitive checkpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    /// Histogram of labels queried per example.
    pub examples_by_queries: Vec<u64>,
    /// Observed costs that fell outside their predicted range.
    pub labels_outside_range: u64,
    /// Mean distance from out-of-range costs to their range.
    pub mean_distance_to_range: f64,
    /// Mean width of the ranges that were missed.
    pub mean_range: f64,
}

/// A queried cost fell outside the declared cost range.
#[derive(Debug, Clone, Serialize)]
pub struct CostOutsideRange {
    /// Class index.
    pub class: u32,
    /// The offending cost.
    pub cost: f32,
    /// Declared lower bound.
    pub cost_min: f32,
    /// Declared upper bound.
    pub cost_max: f32,
}

/// Reduction-mode output accounting for one unlabeled example.
#[derive(Debug, Clone, Serialize)]
pub struct UnlabeledQuery {
    /// Scalar prediction on the example.
    pub prediction: f32,
    /// Importance weight the query rule would grant, if any.
    pub importance: Option<f32>,
}

/// Receives structured diagnostic events from the decision core.
///
/// All methods default to no-ops so sinks implement only what they
/// observe.
pub trait DecisionSink {
    /// A binary query decision was made.
    fn query_decision(&mut self, _event: &QueryDecision) {}

    /// A per-class cost range was constructed.
    fn range_estimate(&mut self, _event: &RangeEstimate) {}

    /// A cost-sensitive inner-loop step completed.
    fn class_decision(&mut self, _event: &ClassDecision) {}

    /// A model checkpoint was written.
    fn checkpoint_saved(&mut self, _event: &CheckpointSaved) {}

    /// A model checkpoint failed to write.
    fn checkpoint_failed(&mut self, _path: &str, _error: &std::io::Error) {}

    /// Budget diagnostics at a checkpoint.
    fn budget_summary(&mut self, _event: &BudgetSummary) {}

    /// A queried cost fell outside the declared range.
    fn cost_outside_range(&mut self, _event: &CostOutsideRange) {}

    /// Reduction-mode accounting evaluated the query rule on an
    /// unlabeled example.
    fn unlabeled_query(&mut self, _event: &UnlabeledQuery) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DecisionSink for NullSink {}

/// Forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DecisionSink for TracingSink {
    fn query_decision(&mut self, event: &QueryDecision) {
        tracing::debug!(
            k = event.k,
            confidence = event.confidence,
            bias = event.bias,
            queried = event.queried,
            "query decision"
        );
    }

    fn range_estimate(&mut self, event: &RangeEstimate) {
        tracing::trace!(
            class = event.class,
            sensitivity = event.sensitivity,
            eta = event.eta,
            min_pred = event.min_pred,
            max_pred = event.max_pred,
            fallback = event.fallback,
            "cost range"
        );
    }

    fn class_decision(&mut self, event: &ClassDecision) {
        tracing::debug!(
            class = event.class,
            prediction = event.prediction,
            score = event.score,
            query_label = event.query_label,
            overlapped = event.overlapped,
            range_large = event.range_large,
            n_overlapped = event.n_overlapped,
            "class decision"
        );
    }

    fn checkpoint_saved(&mut self, event: &CheckpointSaved) {
        tracing::info!(path = %event.path, queries = event.queries, "checkpoint saved");
    }

    fn checkpoint_failed(&mut self, path: &str, error: &std::io::Error) {
        tracing::warn!(path = %path, %error, "checkpoint failed");
    }

    fn budget_summary(&mut self, event: &BudgetSummary) {
        tracing::info!(
            examples_by_queries = ?event.examples_by_queries,
            labels_outside_range = event.labels_outside_range,
            mean_distance_to_range = event.mean_distance_to_range,
            mean_range = event.mean_range,
            "label budget summary"
        );
    }

    fn cost_outside_range(&mut self, event: &CostOutsideRange) {
        tracing::warn!(
            class = event.class,
            cost = event.cost,
            cost_min = event.cost_min,
            cost_max = event.cost_max,
            "cost outside declared range"
        );
    }

    fn unlabeled_query(&mut self, event: &UnlabeledQuery) {
        tracing::debug!(
            prediction = event.prediction,
            importance = ?event.importance,
            "unlabeled example query weight"
        );
    }
}
