//! Fatal setup errors.
//!
//! Configuration problems are rejected before any example is processed.
//! Runtime anomalies (degenerate sensitivity, out-of-range costs,
//! non-converged searches) never surface here; they degrade gracefully
//! and are visible only through diagnostic counters and sink events.

use thiserror::Error;

use crate::config::{Companion, LossFunction};

/// Error raised when a decision component is constructed with an invalid
/// or incompatible configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// The surrounding engine enables a reduction that cannot be combined
    /// with this active-learning variant.
    #[error("cannot combine {variant} active learning with {companion}")]
    IncompatibleReduction {
        /// Which variant rejected the combination.
        variant: &'static str,
        /// The conflicting reduction.
        companion: Companion,
    },

    /// The cost-sensitive variant requires a squared loss; its sensitivity
    /// feedback is meaningless under any other loss.
    #[error("cost-sensitive active learning requires squared loss, got {0}")]
    NonSquaredLoss(LossFunction),

    /// The cost-sensitive variant needs at least one candidate class.
    #[error("num_classes must be at least 1")]
    NoClasses,

    /// The declared cost range is empty or inverted.
    #[error("cost_min must be strictly less than cost_max (got [{min}, {max}])")]
    EmptyCostRange {
        /// Declared lower bound.
        min: f32,
        /// Declared upper bound.
        max: f32,
    },

    /// Mellowness must be a positive finite number.
    #[error("mellowness must be positive and finite (got {0})")]
    BadMellowness(f32),

    /// The range-width multiplier must be a positive finite number.
    #[error("range multiplier must be positive and finite (got {0})")]
    BadRangeMultiplier(f32),
}
