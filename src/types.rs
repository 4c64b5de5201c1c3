//! Shared data types: examples, per-class cost slots, execution modes.

use serde::{Deserialize, Serialize};

/// One sparse feature: hashed index and value.
///
/// Features are opaque to the decision core; only the base learner
/// interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Hashed feature index.
    pub index: u64,
    /// Feature value.
    pub value: f32,
}

/// An example flowing through the decision core.
///
/// Examples are owned by the feeding engine. The core reads `features`
/// only to hand them to the base learner, and writes the prediction,
/// confidence, and importance-weight fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Sparse feature vector.
    pub features: Vec<Feature>,

    /// Ground-truth label (binary) or the regression target channel used
    /// when training the base learner on one class. `None` means
    /// unlabeled.
    pub label: Option<f32>,

    /// Candidate classes with observed costs (cost-sensitive variant).
    pub costs: Vec<PerLabelCost>,

    /// Scalar prediction, populated by the base learner.
    pub prediction: f32,

    /// Argmin class prediction (cost-sensitive variant).
    pub multiclass_prediction: u32,

    /// Raw partial prediction of the most recent base-learner call.
    pub partial_prediction: f32,

    /// Prediction margin scaled by local sensitivity; scratch field
    /// written by the decision core.
    pub confidence: f32,

    /// Importance weight. Multiplied by `1/p` when a label query is
    /// granted with probability `p`.
    pub weight: f32,

    /// Cumulative weighted example count assigned by the feeding engine,
    /// including this example's weight.
    pub example_t: f64,
}

impl Example {
    /// Create an unlabeled example with unit weight.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            label: None,
            costs: Vec::new(),
            prediction: 0.0,
            multiclass_prediction: 0,
            partial_prediction: 0.0,
            confidence: 0.0,
            weight: 1.0,
            example_t: 0.0,
        }
    }
}

impl Default for Example {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Per-class cost slot, constructed fresh for each example and filled in
/// by the cost-sensitive decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerLabelCost {
    /// Class index (1-based, as presented to the caller).
    pub class: u32,

    /// Observed cost for this class, if known.
    pub cost: Option<f32>,

    /// Lower confidence bound on the predicted cost.
    pub min_pred: f32,

    /// Upper confidence bound on the predicted cost.
    pub max_pred: f32,

    /// Bound width exceeds the adaptive threshold `eta(t)`.
    pub is_range_large: bool,

    /// Bound is compatible with the best achievable cost across classes.
    pub is_range_overlapped: bool,

    /// Set during a reduction-mode predict pass: the cost of this class
    /// should be queried and revealed before the learn pass.
    pub query_needed: bool,

    /// Partial prediction of the base learner at this class.
    pub partial_prediction: f32,
}

impl PerLabelCost {
    /// Create a slot for `class` with an optional observed cost.
    pub fn new(class: u32, cost: Option<f32>) -> Self {
        Self {
            class,
            cost,
            ..Self::default()
        }
    }
}

/// Execution mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Labels are available on every example; the decision simulates
    /// active label acquisition and owns budget bookkeeping.
    Simulation,

    /// Pass-through predict/learn; the decision only exposes query
    /// margins (binary) or `query_needed` flags (cost-sensitive) for an
    /// outer layer that owns the budget.
    #[default]
    Reduction,
}

/// Which half of the predict/learn pair a call performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    Predict,
    Learn,
}
