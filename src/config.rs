//! Configuration for the two active-learning variants.
//!
//! Both configs follow the same shape: defaults matching the classical
//! parameterization, chainable builder methods, and a `validate()` gate
//! run at construction. Invalid or mutually incompatible settings are
//! fatal before any example is processed.

use std::fmt;

use crate::constants::{
    DEFAULT_BINARY_MELLOWNESS, DEFAULT_COST_MAX, DEFAULT_COST_MELLOWNESS, DEFAULT_COST_MIN,
    DEFAULT_RANGE_MULTIPLIER, UNBOUNDED_LABELS,
};
use crate::error::SetupError;
use crate::types::Mode;

/// A reduction enabled elsewhere in the surrounding engine, declared so
/// that incompatible stacks are rejected at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// Latent Dirichlet allocation.
    LatentDirichlet,
    /// The binary active-learning reduction.
    BinaryActive,
    /// The cover-based active-learning reduction.
    CoverActive,
    /// One-against-all cost-sensitive classification.
    OneAgainstAll,
    /// The cost-sensitive active-learning reduction.
    CostSensitiveActive,
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Companion::LatentDirichlet => "latent Dirichlet allocation",
            Companion::BinaryActive => "binary active learning",
            Companion::CoverActive => "cover-based active learning",
            Companion::OneAgainstAll => "one-against-all classification",
            Companion::CostSensitiveActive => "cost-sensitive active learning",
        };
        f.write_str(name)
    }
}

/// Loss function of the base learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossFunction {
    /// Squared loss.
    #[default]
    Squared,
    /// Logistic loss.
    Logistic,
    /// Hinge loss.
    Hinge,
    /// Quantile (pinball) loss.
    Quantile,
}

impl fmt::Display for LossFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LossFunction::Squared => "squared",
            LossFunction::Logistic => "logistic",
            LossFunction::Hinge => "hinge",
            LossFunction::Quantile => "quantile",
        };
        f.write_str(name)
    }
}

/// Configuration for the binary active-learning decision.
#[derive(Debug, Clone)]
pub struct ActiveConfig {
    /// Mellowness `c0`: how aggressively the disagreement threshold
    /// widens. Larger values query more.
    pub mellowness: f32,

    /// When declining to query, train on the model's own sign-prediction
    /// instead of discarding the example.
    pub oracular: bool,

    /// Use the simple threshold `sqrt(b) + b` instead of the
    /// loss-adaptive one.
    pub simple_threshold: bool,

    /// Query count at which the model is checkpointed and the threshold
    /// doubled. [`UNBOUNDED_LABELS`] disables checkpointing.
    pub min_labels: u64,

    /// Query count at which learning stops (prediction continues).
    /// [`UNBOUNDED_LABELS`] disables the cap.
    pub max_labels: u64,

    /// Execution mode, fixed for the lifetime of the decision.
    pub mode: Mode,

    /// Path prefix for checkpoint files.
    pub checkpoint_prefix: String,

    /// Deterministic seed for query-decision randomness. `None` uses the
    /// crate default seed.
    pub seed: Option<u64>,

    /// Other reductions enabled in the surrounding engine.
    pub companions: Vec<Companion>,
}

impl Default for ActiveConfig {
    fn default() -> Self {
        Self {
            mellowness: DEFAULT_BINARY_MELLOWNESS,
            oracular: false,
            simple_threshold: false,
            min_labels: UNBOUNDED_LABELS,
            max_labels: UNBOUNDED_LABELS,
            mode: Mode::default(),
            checkpoint_prefix: String::from("model"),
            seed: None,
            companions: Vec::new(),
        }
    }
}

impl ActiveConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mellowness parameter `c0`.
    pub fn mellowness(mut self, c0: f32) -> Self {
        self.mellowness = c0;
        self
    }

    /// Enable oracular self-labeling outside the disagreement region.
    pub fn oracular(mut self, on: bool) -> Self {
        self.oracular = on;
        self
    }

    /// Use the simple disagreement threshold.
    pub fn simple_threshold(mut self, on: bool) -> Self {
        self.simple_threshold = on;
        self
    }

    /// Set the checkpoint/doubling query budget.
    pub fn min_labels(mut self, n: u64) -> Self {
        self.min_labels = n;
        self
    }

    /// Set the maximum query budget.
    pub fn max_labels(mut self, n: u64) -> Self {
        self.max_labels = n;
        self
    }

    /// Set the execution mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the checkpoint path prefix.
    pub fn checkpoint_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.checkpoint_prefix = prefix.into();
        self
    }

    /// Set a deterministic seed for query decisions.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Declare a reduction enabled elsewhere in the engine.
    pub fn companion(mut self, companion: Companion) -> Self {
        self.companions.push(companion);
        self
    }

    /// Check the configuration for fatal problems.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.mellowness.is_finite() || self.mellowness <= 0.0 {
            return Err(SetupError::BadMellowness(self.mellowness));
        }
        for &companion in &self.companions {
            if matches!(
                companion,
                Companion::LatentDirichlet | Companion::CostSensitiveActive
            ) {
                return Err(SetupError::IncompatibleReduction {
                    variant: "binary",
                    companion,
                });
            }
        }
        Ok(())
    }
}

/// Configuration for the cost-sensitive active-learning decision.
#[derive(Debug, Clone)]
pub struct CostSensitiveConfig {
    /// Number of candidate classes.
    pub num_classes: u32,

    /// Mellowness `c0`: scales the empirical-loss threshold `delta(t)`.
    pub mellowness: f32,

    /// Multiplier `c1` on the cost-range width threshold `eta(t)`.
    pub range_multiplier: f32,

    /// Lower bound of the declared cost range.
    pub cost_min: f32,

    /// Upper bound of the declared cost range.
    pub cost_max: f32,

    /// Checkpoint/doubling budget, in labels per class (the effective
    /// threshold is `min_labels * num_classes`).
    pub min_labels: u64,

    /// Maximum query budget, in labels per class (the effective cap is
    /// `max_labels * num_classes`).
    pub max_labels: u64,

    /// Execution mode, fixed for the lifetime of the decision.
    pub mode: Mode,

    /// Baseline policy: when the example is queried, query every
    /// overlapping class regardless of range width.
    pub baseline: bool,

    /// Emit a per-class decision event for every inner-loop step.
    pub print_debug_stuff: bool,

    /// Loss function of the base learner. Must be squared.
    pub loss: LossFunction,

    /// Path prefix for checkpoint files.
    pub checkpoint_prefix: String,

    /// Other reductions enabled in the surrounding engine.
    pub companions: Vec<Companion>,
}

impl CostSensitiveConfig {
    /// Create a configuration for `num_classes` candidate classes.
    pub fn new(num_classes: u32) -> Self {
        Self {
            num_classes,
            mellowness: DEFAULT_COST_MELLOWNESS,
            range_multiplier: DEFAULT_RANGE_MULTIPLIER,
            cost_min: DEFAULT_COST_MIN,
            cost_max: DEFAULT_COST_MAX,
            min_labels: UNBOUNDED_LABELS,
            max_labels: UNBOUNDED_LABELS,
            mode: Mode::default(),
            baseline: false,
            print_debug_stuff: false,
            loss: LossFunction::default(),
            checkpoint_prefix: String::from("model"),
            companions: Vec::new(),
        }
    }

    /// Set the mellowness parameter `c0`.
    pub fn mellowness(mut self, c0: f32) -> Self {
        self.mellowness = c0;
        self
    }

    /// Set the range-width multiplier `c1`.
    pub fn range_multiplier(mut self, c1: f32) -> Self {
        self.range_multiplier = c1;
        self
    }

    /// Set the declared cost range.
    pub fn cost_range(mut self, min: f32, max: f32) -> Self {
        self.cost_min = min;
        self.cost_max = max;
        self
    }

    /// Set the checkpoint/doubling budget (labels per class).
    pub fn min_labels(mut self, n: u64) -> Self {
        self.min_labels = n;
        self
    }

    /// Set the maximum query budget (labels per class).
    pub fn max_labels(mut self, n: u64) -> Self {
        self.max_labels = n;
        self
    }

    /// Set the execution mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable the baseline query policy.
    pub fn baseline(mut self, on: bool) -> Self {
        self.baseline = on;
        self
    }

    /// Emit per-class decision events.
    pub fn print_debug_stuff(mut self, on: bool) -> Self {
        self.print_debug_stuff = on;
        self
    }

    /// Declare the base learner's loss function.
    pub fn loss(mut self, loss: LossFunction) -> Self {
        self.loss = loss;
        self
    }

    /// Set the checkpoint path prefix.
    pub fn checkpoint_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.checkpoint_prefix = prefix.into();
        self
    }

    /// Declare a reduction enabled elsewhere in the engine.
    pub fn companion(mut self, companion: Companion) -> Self {
        self.companions.push(companion);
        self
    }

    /// Check the configuration for fatal problems.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.num_classes == 0 {
            return Err(SetupError::NoClasses);
        }
        if !self.mellowness.is_finite() || self.mellowness <= 0.0 {
            return Err(SetupError::BadMellowness(self.mellowness));
        }
        if !self.range_multiplier.is_finite() || self.range_multiplier <= 0.0 {
            return Err(SetupError::BadRangeMultiplier(self.range_multiplier));
        }
        if !self.cost_min.is_finite()
            || !self.cost_max.is_finite()
            || self.cost_min >= self.cost_max
        {
            return Err(SetupError::EmptyCostRange {
                min: self.cost_min,
                max: self.cost_max,
            });
        }
        if self.loss != LossFunction::Squared {
            return Err(SetupError::NonSquaredLoss(self.loss));
        }
        for &companion in &self.companions {
            if matches!(
                companion,
                Companion::LatentDirichlet
                    | Companion::BinaryActive
                    | Companion::CoverActive
                    | Companion::OneAgainstAll
            ) {
                return Err(SetupError::IncompatibleReduction {
                    variant: "cost-sensitive",
                    companion,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_defaults_validate() {
        assert!(ActiveConfig::default().validate().is_ok());
    }

    #[test]
    fn binary_rejects_lda() {
        let err = ActiveConfig::new()
            .companion(Companion::LatentDirichlet)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SetupError::IncompatibleReduction { .. }));
    }

    #[test]
    fn binary_rejects_other_active_variant() {
        let err = ActiveConfig::new()
            .companion(Companion::CostSensitiveActive)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SetupError::IncompatibleReduction { .. }));
    }

    #[test]
    fn binary_rejects_nonpositive_mellowness() {
        let err = ActiveConfig::new().mellowness(0.0).validate().unwrap_err();
        assert_eq!(err, SetupError::BadMellowness(0.0));
    }

    #[test]
    fn cost_sensitive_defaults_validate() {
        assert!(CostSensitiveConfig::new(3).validate().is_ok());
    }

    #[test]
    fn cost_sensitive_rejects_non_squared_loss() {
        let err = CostSensitiveConfig::new(3)
            .loss(LossFunction::Logistic)
            .validate()
            .unwrap_err();
        assert_eq!(err, SetupError::NonSquaredLoss(LossFunction::Logistic));
    }

    #[test]
    fn cost_sensitive_rejects_binary_companion() {
        let err = CostSensitiveConfig::new(3)
            .companion(Companion::BinaryActive)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            SetupError::IncompatibleReduction {
                variant: "cost-sensitive",
                companion: Companion::BinaryActive,
            }
        ));
    }

    #[test]
    fn cost_sensitive_rejects_empty_cost_range() {
        let err = CostSensitiveConfig::new(3)
            .cost_range(1.0, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SetupError::EmptyCostRange { .. }));
    }

    #[test]
    fn cost_sensitive_rejects_zero_classes() {
        assert_eq!(
            CostSensitiveConfig::new(0).validate().unwrap_err(),
            SetupError::NoClasses
        );
    }
}
