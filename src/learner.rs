//! Collaborator traits: the incremental base learner and the model
//! checkpoint store.

use std::io;

use crate::types::Example;

/// A generic incremental predictor/learner.
///
/// The decision core drives the base learner through this trait and never
/// inspects the model itself. `slot` selects the regressor: the binary
/// variant always passes 0; the cost-sensitive variant passes the
/// zero-based class offset (`class - 1`).
pub trait Learner {
    /// Predict on `example`, populating its `prediction` and
    /// `partial_prediction` fields.
    fn predict(&mut self, example: &mut Example, slot: u32);

    /// Update the model from `example`'s label channel and importance
    /// weight.
    fn learn(&mut self, example: &mut Example, slot: u32);

    /// Local sensitivity (curvature) of the model at `example`: how much
    /// the prediction would move per unit of importance weight. May
    /// return NaN or infinity for degenerate curvature; callers degrade
    /// gracefully.
    fn sensitivity(&mut self, example: &mut Example, slot: u32) -> f32;
}

/// Persists the model when a query budget checkpoint is reached.
pub trait Checkpoint {
    /// Save the current model to `path`. The path encodes round and query
    /// counters so successive checkpoints never collide.
    fn save_model(&mut self, path: &str) -> io::Result<()>;
}

/// A checkpoint store that discards every save.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCheckpoint;

impl Checkpoint for NullCheckpoint {
    fn save_model(&mut self, _path: &str) -> io::Result<()> {
        Ok(())
    }
}
