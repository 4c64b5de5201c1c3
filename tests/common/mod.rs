//! Shared stub collaborators for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use quaero::output::{
    BudgetSummary, CheckpointSaved, ClassDecision, CostOutsideRange, DecisionSink, QueryDecision,
    RangeEstimate, UnlabeledQuery,
};
use quaero::{Checkpoint, Example, Feature, Learner, PerLabelCost};

/// One recorded `learn` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnCall {
    pub slot: u32,
    pub label: Option<f32>,
    pub weight: f32,
}

/// Base learner with scripted per-slot predictions and sensitivities.
pub struct StubLearner {
    pub predictions: Vec<f32>,
    pub sensitivities: Vec<f32>,
    pub learned: Vec<LearnCall>,
    pub predict_calls: usize,
}

impl StubLearner {
    pub fn new(predictions: Vec<f32>, sensitivities: Vec<f32>) -> Self {
        Self {
            predictions,
            sensitivities,
            learned: Vec::new(),
            predict_calls: 0,
        }
    }

    /// Same prediction and sensitivity for every slot.
    pub fn constant(prediction: f32, sensitivity: f32) -> Self {
        Self::new(vec![prediction], vec![sensitivity])
    }

    fn at(values: &[f32], slot: u32) -> f32 {
        values[(slot as usize).min(values.len() - 1)]
    }
}

impl Learner for StubLearner {
    fn predict(&mut self, ec: &mut Example, slot: u32) {
        let p = Self::at(&self.predictions, slot);
        ec.prediction = p;
        ec.partial_prediction = p;
        self.predict_calls += 1;
    }

    fn learn(&mut self, ec: &mut Example, slot: u32) {
        self.learned.push(LearnCall {
            slot,
            label: ec.label,
            weight: ec.weight,
        });
    }

    fn sensitivity(&mut self, _ec: &mut Example, slot: u32) -> f32 {
        Self::at(&self.sensitivities, slot)
    }
}

/// Checkpoint store that records every saved path.
///
/// Clones share the same log, so tests keep a handle after moving the
/// store into a decision.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub saved: Rc<RefCell<Vec<String>>>,
}

impl Checkpoint for RecordingStore {
    fn save_model(&mut self, path: &str) -> io::Result<()> {
        self.saved.borrow_mut().push(path.to_string());
        Ok(())
    }
}

/// Checkpoint store whose saves always fail.
#[derive(Clone, Copy, Default)]
pub struct FailingStore;

impl Checkpoint for FailingStore {
    fn save_model(&mut self, _path: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

/// Everything the decision reported through its sink.
#[derive(Default)]
pub struct EventLog {
    pub query_decisions: Vec<QueryDecision>,
    pub range_estimates: Vec<RangeEstimate>,
    pub class_decisions: Vec<ClassDecision>,
    pub checkpoints: Vec<CheckpointSaved>,
    pub summaries: Vec<BudgetSummary>,
    pub out_of_range: Vec<CostOutsideRange>,
    pub unlabeled: Vec<UnlabeledQuery>,
}

/// Sink that records events into a shared log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub log: Rc<RefCell<EventLog>>,
}

impl DecisionSink for RecordingSink {
    fn query_decision(&mut self, event: &QueryDecision) {
        self.log.borrow_mut().query_decisions.push(event.clone());
    }

    fn range_estimate(&mut self, event: &RangeEstimate) {
        self.log.borrow_mut().range_estimates.push(event.clone());
    }

    fn class_decision(&mut self, event: &ClassDecision) {
        self.log.borrow_mut().class_decisions.push(event.clone());
    }

    fn checkpoint_saved(&mut self, event: &CheckpointSaved) {
        self.log.borrow_mut().checkpoints.push(event.clone());
    }

    fn budget_summary(&mut self, event: &BudgetSummary) {
        self.log.borrow_mut().summaries.push(event.clone());
    }

    fn cost_outside_range(&mut self, event: &CostOutsideRange) {
        self.log.borrow_mut().out_of_range.push(event.clone());
    }

    fn unlabeled_query(&mut self, event: &UnlabeledQuery) {
        self.log.borrow_mut().unlabeled.push(event.clone());
    }
}

/// A labeled binary example at the given weighted round.
pub fn binary_example(label: f32, example_t: f64) -> Example {
    let mut ec = Example::new(vec![Feature {
        index: 1,
        value: 1.0,
    }]);
    ec.label = Some(label);
    ec.example_t = example_t;
    ec
}

/// A cost-sensitive example with one slot per `(class, cost)` pair.
pub fn cost_example(costs: &[(u32, f32)], example_t: f64) -> Example {
    let mut ec = Example::new(vec![Feature {
        index: 1,
        value: 1.0,
    }]);
    ec.costs = costs
        .iter()
        .map(|&(class, cost)| PerLabelCost::new(class, Some(cost)))
        .collect();
    ec.example_t = example_t;
    ec
}
