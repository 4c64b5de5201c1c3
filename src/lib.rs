//! # quaero
//!
//! Label-efficient online active learning.
//!
//! This crate is the decision core of an active-learning reduction layered
//! on top of a generic incremental predictor/learner: for each incoming
//! example it decides, before or instead of consuming a ground-truth
//! label, whether the true label is worth requesting, trading
//! label-acquisition cost against learning-quality loss.
//!
//! Two variants are provided:
//! - [`BinaryActive`]: a coin-flip query rule whose bias adapts to the
//!   empirical loss and the prediction margin. Queried examples are
//!   importance-reweighted by the inverse query probability so learning
//!   stays unbiased.
//! - [`CostSensitiveActive`]: a multiclass rule that bounds each class's
//!   predicted cost with a confidence interval and queries only when more
//!   than one class could plausibly be optimal (the region of
//!   disagreement).
//!
//! The base learner and the checkpoint store are collaborators behind the
//! [`Learner`] and [`Checkpoint`] traits; shared statistics live in a
//! [`GlobalStats`] value passed explicitly into every call. Diagnostics
//! flow through a pluggable [`DecisionSink`].
//!
//! ## Common Pitfall: Predict Before Learn in Reduction Mode
//!
//! In reduction mode the cost-sensitive decision is a two-phase protocol
//! on the *same* example object: the predict pass writes `query_needed`
//! on each cost slot, the outer layer reveals the flagged costs, and the
//! learn pass consumes exactly those. Calling `learn` without the
//! preceding `predict` trains on nothing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quaero::{ActiveConfig, BinaryActive, GlobalStats, Mode};
//!
//! let mut active = BinaryActive::new(
//!     ActiveConfig::new()
//!         .mode(Mode::Simulation)
//!         .mellowness(8.0)
//!         .seed(42),
//! )?;
//! let mut stats = GlobalStats::new();
//!
//! for mut example in stream {
//!     active.learn(&mut base, &mut example, &mut stats);
//! }
//! println!("labels consumed: {}", stats.queries);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod binary;
mod budget;
mod config;
mod constants;
mod cost_sensitive;
mod error;
mod learner;
mod stats;
mod types;

pub mod output;
pub mod statistics;

// Re-exports for the public API.
pub use binary::{coin_bias, BinaryActive};
pub use budget::LabelBudget;
pub use config::{ActiveConfig, Companion, CostSensitiveConfig, LossFunction};
pub use constants::{DEFAULT_SEED, UNBOUNDED_LABELS};
pub use cost_sensitive::{CostRangeEstimator, CostSensitiveActive};
pub use error::SetupError;
pub use learner::{Checkpoint, Learner, NullCheckpoint};
pub use output::{DecisionSink, NullSink, TracingSink};
pub use stats::GlobalStats;
pub use types::{Example, Feature, Mode, PerLabelCost};
