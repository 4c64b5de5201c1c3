//! Cost-sensitive active learning over a region of disagreement.
//!
//! For each example the decision bounds every class's predicted cost with
//! a confidence interval, then asks which classes could still plausibly
//! be optimal: a class overlaps when its lower bound does not exceed the
//! best achievable upper bound. Genuine ambiguity (more than one
//! overlapping class) triggers label queries for the classes whose
//! intervals are both overlapping and wide. The argmin over partial
//! predictions is the example's class prediction, with deterministic
//! tie-breaks toward the smaller index.

mod range;

pub use range::CostRangeEstimator;

use crate::budget::LabelBudget;
use crate::config::CostSensitiveConfig;
use crate::error::SetupError;
use crate::learner::{Checkpoint, Learner, NullCheckpoint};
use crate::output::{
    BudgetSummary, CheckpointSaved, ClassDecision, CostOutsideRange, DecisionSink, TracingSink,
};
use crate::stats::GlobalStats;
use crate::types::{Example, Mode, Pass, PerLabelCost};

/// Cost-sensitive active-learning decision.
///
/// Construct once at setup with [`CostSensitiveConfig`]. In reduction
/// mode the caller must run a predict pass before the learn pass on the
/// same example object: predict writes `query_needed` on each cost slot,
/// and learn consumes the costs revealed for exactly those slots.
pub struct CostSensitiveActive {
    config: CostSensitiveConfig,
    budget: LabelBudget,
    t: u64,
    store: Box<dyn Checkpoint>,
    sink: Box<dyn DecisionSink>,
}

impl CostSensitiveActive {
    /// Create a decision from a validated configuration.
    pub fn new(config: CostSensitiveConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let budget = LabelBudget::new(
            config.min_labels,
            config.max_labels,
            u64::from(config.num_classes),
        );
        Ok(Self {
            config,
            budget,
            t: 1,
            store: Box::new(NullCheckpoint),
            sink: Box::new(TracingSink),
        })
    }

    /// Replace the checkpoint store.
    pub fn with_store(mut self, store: impl Checkpoint + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: impl DecisionSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Current learning round (advances after each learning pass).
    pub fn round(&self) -> u64 {
        self.t
    }

    /// Current checkpoint threshold in labels per class.
    pub fn min_labels(&self) -> u64 {
        self.budget.min_labels()
    }

    /// Predict the argmin class for one example.
    pub fn predict(&mut self, base: &mut dyn Learner, example: &mut Example, stats: &mut GlobalStats) {
        self.process(base, example, stats, Pass::Predict);
    }

    /// Learn from one example, querying the costs of ambiguous classes.
    pub fn learn(&mut self, base: &mut dyn Learner, example: &mut Example, stats: &mut GlobalStats) {
        self.process(base, example, stats, Pass::Learn);
    }

    fn process(&mut self, base: &mut dyn Learner, ec: &mut Example, stats: &mut GlobalStats, pass: Pass) {
        if self.budget.checkpoint_due(stats.queries) {
            self.write_checkpoint(ec, stats);
            self.budget.double_min();
        }

        // An exhausted budget suppresses learning; prediction continues.
        let learning = pass == Pass::Learn && !self.budget.exhausted(stats.queries);

        let mut best_class = 1u32;
        let mut best_score = f32::MAX;

        let mut costs = std::mem::take(&mut ec.costs);
        if costs.is_empty() {
            // No candidate costs: a pure prediction pass over every class.
            for class in 1..=self.config.num_classes {
                base.predict(ec, class - 1);
                if ec.partial_prediction < best_score
                    || (ec.partial_prediction == best_score && class < best_class)
                {
                    best_score = ec.partial_prediction;
                    best_class = class;
                }
            }
        } else {
            let t = self.t as f32;
            let t_prev = (t - 1.0).max(1.0);
            let span = self.config.cost_max - self.config.cost_min;

            // Threshold on cost-range width.
            let eta = self.config.range_multiplier * span / t.sqrt();
            // Threshold on the empirical loss difference.
            let delta =
                self.config.mellowness * (self.config.num_classes as f32 * t_prev).ln() * span * span;

            let estimator = CostRangeEstimator {
                t: self.t,
                delta,
                eta,
                cost_min: self.config.cost_min,
                cost_max: self.config.cost_max,
            };

            // Best achievable upper bound across classes.
            let mut min_max_cost = f32::MAX;
            for cl in costs.iter_mut() {
                estimator.estimate(base, ec, cl, self.sink.as_mut());
                min_max_cost = min_max_cost.min(cl.max_pred);
            }

            let mut n_overlapped = 0u32;
            for cl in costs.iter_mut() {
                cl.is_range_overlapped = cl.min_pred <= min_max_cost;
                n_overlapped += u32::from(cl.is_range_overlapped);
                stats.overlapped_and_range_small +=
                    u64::from(cl.is_range_overlapped && !cl.is_range_large);

                if let Some(x) = cl.cost {
                    if x > cl.max_pred || x < cl.min_pred {
                        stats.labels_outside_range += 1;
                        stats.distance_to_range += f64::from((x - cl.max_pred).max(cl.min_pred - x));
                        stats.range += f64::from(cl.max_pred - cl.min_pred);
                    }
                }
            }

            // More than one class could still be optimal: query.
            let query = n_overlapped > 1;
            let queries_before = stats.queries;
            for cl in costs.iter_mut() {
                let eligible = if self.config.baseline {
                    cl.is_range_overlapped
                } else {
                    cl.is_range_overlapped && cl.is_range_large
                };
                let query_this_label = query && eligible;
                self.inner_loop(
                    base,
                    ec,
                    cl,
                    query_this_label,
                    learning,
                    &mut best_class,
                    &mut best_score,
                    stats,
                );
                if self.config.print_debug_stuff {
                    self.sink.class_decision(&ClassDecision {
                        class: cl.class,
                        cost: cl.cost,
                        prediction: best_class,
                        score: best_score,
                        partial_prediction: cl.partial_prediction,
                        query_label: query_this_label,
                        query_needed: cl.query_needed,
                        overlapped: cl.is_range_overlapped,
                        range_large: cl.is_range_large,
                        min_pred: cl.min_pred,
                        max_pred: cl.max_pred,
                        n_overlapped,
                        baseline: self.config.baseline,
                    });
                }
            }

            stats.record_example_queries((stats.queries - queries_before) as usize);
            ec.partial_prediction = best_score;
            if learning {
                self.t += 1;
            }
        }

        ec.costs = costs;
        ec.multiclass_prediction = best_class;
    }

    #[allow(clippy::too_many_arguments)]
    fn inner_loop(
        &mut self,
        base: &mut dyn Learner,
        ec: &mut Example,
        cl: &mut PerLabelCost,
        query_this_label: bool,
        learning: bool,
        best_class: &mut u32,
        best_score: &mut f32,
        stats: &mut GlobalStats,
    ) {
        debug_assert!(cl.class >= 1, "class indices are 1-based");
        let slot = cl.class.saturating_sub(1);

        base.predict(ec, slot);

        if learning {
            ec.weight = 1.0;
            let resolved = match self.config.mode {
                Mode::Simulation => match (query_this_label, cl.cost) {
                    (true, Some(cost)) => {
                        stats.queries += 1;
                        Some(cost)
                    }
                    _ => None,
                },
                Mode::Reduction => {
                    // A cost queried on the earlier predict pass is
                    // available now; anything else is skipped.
                    if cl.query_needed {
                        if let Some(cost) = cl.cost {
                            if cost < self.config.cost_min || cost > self.config.cost_max {
                                self.sink.cost_outside_range(&CostOutsideRange {
                                    class: cl.class,
                                    cost,
                                    cost_min: self.config.cost_min,
                                    cost_max: self.config.cost_max,
                                });
                            }
                            Some(cost)
                        } else {
                            None
                        }
                    } else {
                        None
                    }
                }
            };

            ec.label = resolved;
            if resolved.is_some() {
                base.learn(ec, slot);
            }
        } else if self.config.mode == Mode::Reduction {
            // Prediction in reduction mode tells the outer layer which
            // labels to go and query.
            cl.query_needed = query_this_label;
        }

        cl.partial_prediction = ec.partial_prediction;
        if ec.partial_prediction < *best_score
            || (ec.partial_prediction == *best_score && cl.class < *best_class)
        {
            *best_score = ec.partial_prediction;
            *best_class = cl.class;
        }
    }

    fn write_checkpoint(&mut self, ec: &Example, stats: &GlobalStats) {
        let path = format!(
            "{}.{}.{}",
            self.config.checkpoint_prefix, ec.example_t, stats.queries
        );
        match self.store.save_model(&path) {
            Ok(()) => self.sink.checkpoint_saved(&CheckpointSaved {
                path,
                queries: stats.queries,
            }),
            Err(err) => self.sink.checkpoint_failed(&path, &err),
        }
        self.sink.budget_summary(&BudgetSummary {
            examples_by_queries: stats.examples_by_queries.clone(),
            labels_outside_range: stats.labels_outside_range,
            mean_distance_to_range: stats.mean_distance_to_range(),
            mean_range: stats.mean_range(),
        });
    }
}
