//! Per-class confidence intervals on predicted cost.

use crate::constants::RANGE_TOLERANCE;
use crate::learner::Learner;
use crate::output::{DecisionSink, RangeEstimate};
use crate::statistics::largest_feasible_weight;
use crate::types::{Example, PerLabelCost};

/// Builds `[min_pred, max_pred]` for one class of one example.
///
/// The schedule values `delta(t)` and `eta(t)` are computed once per
/// example by the orchestrating decision and shared across classes.
#[derive(Debug, Clone, Copy)]
pub struct CostRangeEstimator {
    /// Current learning round.
    pub t: u64,
    /// Variance budget `delta(t)` for the feasible-weight search.
    pub delta: f32,
    /// Adaptive width threshold `eta(t)`.
    pub eta: f32,
    /// Declared lower cost bound.
    pub cost_min: f32,
    /// Declared upper cost bound.
    pub cost_max: f32,
}

impl CostRangeEstimator {
    /// Predict the cost of `cl.class` and bound it.
    ///
    /// On the first round, or when the base learner reports degenerate
    /// curvature (NaN or infinite sensitivity), the bound degrades to the
    /// full declared range and is marked large; processing continues.
    pub fn estimate(
        &self,
        base: &mut dyn Learner,
        ec: &mut Example,
        cl: &mut PerLabelCost,
        sink: &mut dyn DecisionSink,
    ) {
        debug_assert!(cl.class >= 1, "class indices are 1-based");
        let slot = cl.class.saturating_sub(1);

        base.predict(ec, slot);
        let sens = base.sensitivity(ec, slot);

        let fallback = self.t <= 1 || sens.is_nan() || sens.is_infinite();
        if fallback {
            cl.min_pred = self.cost_min;
            cl.max_pred = self.cost_max;
            cl.is_range_large = true;
        } else {
            let fhat = ec.prediction;
            let up = largest_feasible_weight(self.cost_max - fhat, self.delta, sens, RANGE_TOLERANCE);
            let down = largest_feasible_weight(fhat - self.cost_min, self.delta, sens, RANGE_TOLERANCE);
            cl.max_pred = (fhat + sens * up).min(self.cost_max);
            cl.min_pred = (fhat - sens * down).max(self.cost_min);
            cl.is_range_large = cl.max_pred - cl.min_pred > self.eta;
        }

        sink.range_estimate(&RangeEstimate {
            class: cl.class,
            sensitivity: sens,
            eta: self.eta,
            min_pred: cl.min_pred,
            max_pred: cl.max_pred,
            fallback,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NullSink;

    struct FixedLearner {
        prediction: f32,
        sensitivity: f32,
    }

    impl Learner for FixedLearner {
        fn predict(&mut self, ec: &mut Example, _slot: u32) {
            ec.prediction = self.prediction;
            ec.partial_prediction = self.prediction;
        }

        fn learn(&mut self, _ec: &mut Example, _slot: u32) {}

        fn sensitivity(&mut self, _ec: &mut Example, _slot: u32) -> f32 {
            self.sensitivity
        }
    }

    fn estimator(t: u64) -> CostRangeEstimator {
        CostRangeEstimator {
            t,
            delta: 0.11,
            eta: 0.35,
            cost_min: 0.0,
            cost_max: 1.0,
        }
    }

    #[test]
    fn first_round_falls_back_to_full_range() {
        let mut base = FixedLearner {
            prediction: 0.4,
            sensitivity: 0.1,
        };
        let mut ec = Example::default();
        let mut cl = PerLabelCost::new(1, Some(0.4));
        estimator(1).estimate(&mut base, &mut ec, &mut cl, &mut NullSink);
        assert_eq!(cl.min_pred, 0.0);
        assert_eq!(cl.max_pred, 1.0);
        assert!(cl.is_range_large);
    }

    #[test]
    fn degenerate_sensitivity_falls_back_to_full_range() {
        for sens in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut base = FixedLearner {
                prediction: 0.4,
                sensitivity: sens,
            };
            let mut ec = Example::default();
            let mut cl = PerLabelCost::new(2, Some(0.4));
            estimator(10).estimate(&mut base, &mut ec, &mut cl, &mut NullSink);
            assert_eq!((cl.min_pred, cl.max_pred), (0.0, 1.0));
            assert!(cl.is_range_large);
        }
    }

    #[test]
    fn bounds_are_clipped_to_declared_range() {
        // Large sensitivity pushes both searches to the fast path; the
        // raw bounds exceed the declared range and must be clipped.
        let mut base = FixedLearner {
            prediction: 0.5,
            sensitivity: 10.0,
        };
        let mut ec = Example::default();
        let mut cl = PerLabelCost::new(1, Some(0.5));
        estimator(10).estimate(&mut base, &mut ec, &mut cl, &mut NullSink);
        assert!(cl.min_pred >= 0.0);
        assert!(cl.max_pred <= 1.0);
        assert!(cl.min_pred <= cl.max_pred);
    }

    #[test]
    fn narrow_interval_when_sensitivity_is_small() {
        let mut base = FixedLearner {
            prediction: 0.2,
            sensitivity: 0.01,
        };
        let mut ec = Example::default();
        let mut cl = PerLabelCost::new(1, Some(0.2));
        estimator(10).estimate(&mut base, &mut ec, &mut cl, &mut NullSink);
        assert!(cl.max_pred - cl.min_pred < 0.35);
        assert!(!cl.is_range_large);
        assert!(cl.min_pred <= 0.2 && 0.2 <= cl.max_pred);
    }
}
