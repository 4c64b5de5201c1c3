//! Binary active learning: coin-flip label queries with an adaptive bias.
//!
//! Each example's query probability is derived from the empirical loss and
//! the prediction margin scaled by the base learner's local sensitivity.
//! Examples inside the disagreement region are always queried; outside it
//! the probability decays with the margin, and queried examples are
//! importance-reweighted by `1/p` so learning stays unbiased.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::budget::LabelBudget;
use crate::config::ActiveConfig;
use crate::constants::DEFAULT_SEED;
use crate::error::SetupError;
use crate::learner::{Checkpoint, Learner, NullCheckpoint};
use crate::output::{CheckpointSaved, DecisionSink, QueryDecision, TracingSink, UnlabeledQuery};
use crate::stats::GlobalStats;
use crate::types::{Example, Mode, Pass};

/// Closed-form constants of the simple-threshold query probability.
const C1: f32 = 5.0 + 2.0 * std::f32::consts::SQRT_2;
const C2: f32 = 5.0;

fn sign(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Query probability for one example.
///
/// * `k` - rounds seen so far
/// * `avg_loss` - empirical loss estimate, clamped to `[0, 1]`
/// * `g` - prediction margin scaled by sensitivity, divided by `k`
/// * `c0` - mellowness
///
/// Examples with `g` below the disagreement threshold are queried with
/// probability 1. Outside the threshold, oracular mode never queries;
/// otherwise the probability follows the closed-form solution of the
/// bias quadratic. The result is always in `[0, 1]`.
pub fn coin_bias(
    k: f32,
    avg_loss: f32,
    g: f32,
    c0: f32,
    oracular: bool,
    simple_threshold: bool,
) -> f32 {
    let b = c0 * ((k + 1.0).ln() + 1e-4) / (k + 1e-4);
    let sb = b.sqrt();

    let avg_loss = avg_loss.clamp(0.0, 1.0);
    let sl = avg_loss.sqrt() + (avg_loss + g).sqrt();
    let threshold = if simple_threshold { sb + b } else { sb * sl + b };

    if g <= threshold {
        return 1.0;
    }
    if oracular {
        return 0.0;
    }

    let rs = if simple_threshold {
        let a = (C1 - 1.0) * sb + (C2 - 1.0) * b + g;
        (C1 + (C1 * C1 + 4.0 * a * C2).sqrt()) / (2.0 * a)
    } else {
        (sl + (sl * sl + 4.0 * g).sqrt()) / (2.0 * g)
    };

    (b * rs * rs).clamp(0.0, 1.0)
}

/// Binary active-learning decision.
///
/// Construct once at setup with [`ActiveConfig`]; the execution mode and
/// collaborators are fixed for the lifetime of the value. Each call
/// receives the base learner and the shared statistics explicitly.
pub struct BinaryActive {
    config: ActiveConfig,
    budget: LabelBudget,
    rng: Xoshiro256PlusPlus,
    store: Box<dyn Checkpoint>,
    sink: Box<dyn DecisionSink>,
}

impl BinaryActive {
    /// Create a decision from a validated configuration.
    pub fn new(config: ActiveConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let budget = LabelBudget::new(config.min_labels, config.max_labels, 1);
        let rng = Xoshiro256PlusPlus::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Ok(Self {
            config,
            budget,
            rng,
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

    /// Current checkpoint threshold (doubles after each checkpoint).
    pub fn min_labels(&self) -> u64 {
        self.budget.min_labels()
    }

    /// Predict on one example.
    pub fn predict(&mut self, base: &mut dyn Learner, example: &mut Example, stats: &mut GlobalStats) {
        self.run(base, example, stats, Pass::Predict);
    }

    /// Learn from one example, deciding first whether its label is worth
    /// consuming.
    pub fn learn(&mut self, base: &mut dyn Learner, example: &mut Example, stats: &mut GlobalStats) {
        self.run(base, example, stats, Pass::Learn);
    }

    fn run(&mut self, base: &mut dyn Learner, ec: &mut Example, stats: &mut GlobalStats, pass: Pass) {
        match self.config.mode {
            Mode::Simulation => self.run_simulation(base, ec, stats, pass),
            Mode::Reduction => self.run_reduction(base, ec, stats, pass),
        }
    }

    /// Decide whether to query the label of an example with the given
    /// confidence margin at round `k`.
    ///
    /// Returns the importance weight `1/p` when the query is granted.
    /// Consumes exactly one draw from the decision's random generator,
    /// whether or not a query results.
    pub fn query_decision(&mut self, confidence: f32, k: f32, stats: &GlobalStats) -> Option<f32> {
        let bias = if k <= 1.0 {
            // No statistics yet: always query.
            1.0
        } else {
            let weighted_queries = (stats.initial_t + stats.weighted_examples
                - stats.weighted_unlabeled_examples) as f32;
            let avg_loss = (stats.sum_loss / f64::from(k)) as f32
                + ((1.0 + 0.5 * k.ln()) / (weighted_queries + 1e-4)).sqrt();
            coin_bias(
                k,
                avg_loss,
                confidence / k,
                self.config.mellowness,
                self.config.oracular,
                self.config.simple_threshold,
            )
        };

        let draw: f32 = self.rng.random();
        let importance = if draw < bias { Some(1.0 / bias) } else { None };
        self.sink.query_decision(&QueryDecision {
            k,
            confidence,
            bias,
            queried: importance.is_some(),
            importance,
        });
        importance
    }

    fn run_simulation(
        &mut self,
        base: &mut dyn Learner,
        ec: &mut Example,
        stats: &mut GlobalStats,
        pass: Pass,
    ) {
        base.predict(ec, 0);
        if pass == Pass::Predict {
            return;
        }

        if self.budget.checkpoint_due(stats.queries) {
            let path = format!(
                "{}.{}.{}.{}.{}",
                self.config.checkpoint_prefix,
                stats.n_processed,
                stats.n_in_dis,
                stats.sum_error_not_in_dis,
                stats.queries
            );
            match self.store.save_model(&path) {
                Ok(()) => self.sink.checkpoint_saved(&CheckpointSaved {
                    path,
                    queries: stats.queries,
                }),
                Err(err) => self.sink.checkpoint_failed(&path, &err),
            }
            self.budget.double_min();
        }

        // The cap suppresses learning only; the prediction above stands.
        if self.budget.exhausted(stats.queries) {
            return;
        }

        let k = (ec.example_t - f64::from(ec.weight)) as f32;
        let sens = base.sensitivity(ec, 0);
        let margin = ec.prediction.abs();
        ec.confidence = if sens.is_finite() && sens > 0.0 {
            margin / sens
        } else {
            // Degenerate curvature: treat the example as maximally far
            // from the decision boundary.
            f32::MAX
        };

        let importance = self.query_decision(ec.confidence, k, stats);

        stats.n_processed = ec.example_t;
        if matches!(importance, Some(w) if (w - 1.0).abs() <= 1e-10) {
            stats.n_in_dis += 1;
        }

        match importance {
            Some(weight) => {
                stats.queries += 1;
                ec.weight *= weight;
                if ec.label.is_some() {
                    base.learn(ec, 0);
                }
            }
            None if self.config.oracular => {
                // Train on the model's own sign-prediction. The true
                // label feeds only the error counter, never the update.
                let synthetic = sign(ec.prediction);
                if let Some(truth) = ec.label {
                    if sign(truth) != synthetic {
                        stats.sum_error_not_in_dis += 1;
                    }
                }
                ec.label = Some(synthetic);
                base.learn(ec, 0);
            }
            None => {
                ec.label = None;
            }
        }
    }

    fn run_reduction(
        &mut self,
        base: &mut dyn Learner,
        ec: &mut Example,
        stats: &mut GlobalStats,
        pass: Pass,
    ) {
        match pass {
            Pass::Learn => base.learn(ec, 0),
            Pass::Predict => base.predict(ec, 0),
        }

        if ec.label.is_none() {
            let threshold = (stats.max_label + stats.min_label) * 0.5;
            let sens = base.sensitivity(ec, 0);
            ec.confidence = if sens.is_finite() && sens > 0.0 {
                (ec.prediction - threshold).abs() / sens
            } else {
                f32::MAX
            };
        }
    }

    /// Reduction-mode output accounting for one finished example.
    ///
    /// Updates the labeled/unlabeled weight accounting and, for unlabeled
    /// examples, evaluates the query rule at the current unlabeled count
    /// and reports the granted importance weight through the sink. Budget
    /// bookkeeping belongs to the outer layer in this mode.
    pub fn account_example(&mut self, ec: &Example, stats: &mut GlobalStats) -> Option<f32> {
        match ec.label {
            Some(label) => {
                stats.weighted_labels += f64::from(label) * f64::from(ec.weight);
                None
            }
            None => {
                stats.weighted_unlabeled_examples += f64::from(ec.weight);
                let k = stats.weighted_unlabeled_examples as f32;
                let importance = self.query_decision(ec.confidence, k, stats);
                self.sink.unlabeled_query(&UnlabeledQuery {
                    prediction: ec.prediction,
                    importance,
                });
                importance
            }
        }
    }
}
