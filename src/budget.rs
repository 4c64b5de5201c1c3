//! Query budget bookkeeping: checkpoint thresholds and the hard cap.

/// Tracks cumulative queries against the min/max label budgets.
///
/// `scale` is 1 for the binary variant and `num_classes` for the
/// cost-sensitive variant, where budgets are declared per class.
/// Crossing the `min_labels` threshold signals a checkpoint, after which
/// the threshold doubles; crossing `max_labels` suppresses learning while
/// prediction continues.
#[derive(Debug, Clone)]
pub struct LabelBudget {
    min_labels: u64,
    max_labels: u64,
    scale: u64,
}

impl LabelBudget {
    /// Create a budget. [`crate::UNBOUNDED_LABELS`] for either bound
    /// disables it.
    pub fn new(min_labels: u64, max_labels: u64, scale: u64) -> Self {
        Self {
            min_labels,
            max_labels,
            scale: scale.max(1),
        }
    }

    /// Current checkpoint threshold in labels (before scaling).
    pub fn min_labels(&self) -> u64 {
        self.min_labels
    }

    /// Hard query cap in labels (before scaling).
    pub fn max_labels(&self) -> u64 {
        self.max_labels
    }

    /// True when `queries` has reached the current checkpoint threshold.
    pub fn checkpoint_due(&self, queries: u64) -> bool {
        queries >= self.min_labels.saturating_mul(self.scale)
    }

    /// Double the checkpoint threshold after a checkpoint was taken.
    /// Strictly increases the threshold (saturating at unbounded).
    pub fn double_min(&mut self) {
        self.min_labels = self
            .min_labels
            .saturating_mul(2)
            .max(self.min_labels.saturating_add(1));
    }

    /// True when `queries` has exhausted the hard cap.
    pub fn exhausted(&self, queries: u64) -> bool {
        queries >= self.max_labels.saturating_mul(self.scale)
    }
}
