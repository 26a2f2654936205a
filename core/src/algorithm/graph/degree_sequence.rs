//! Degree Sequence Realizability (Havel-Hakimi)
//!
//! Decides whether a sequence of integers is the degree sequence of some
//! simple undirected graph. Each iteration sorts the remaining degrees in
//! descending order, removes the largest degree `k`, and connects it to the
//! next `k` largest by decrementing them. The sequence shrinks by one element
//! per iteration, so at most `n` iterations run.
//!
//! # Verdicts
//!
//! - Reaching the empty sequence means the input is realizable
//! - A negative maximum proves that some node was asked for more edges than
//!   it can take
//! - A maximum `k` with fewer than `k` remaining elements means there are not
//!   enough nodes to absorb its edges
//!
//! Both negative verdicts are ordinary results carrying the full trace.
//!
//! The Erdős–Gallai characterization is provided as an independent check and
//! is used when `verify_result` is enabled.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, unknown_parameter, Algorithm, AlgorithmComplexity, AlgorithmError,
    AlgorithmMetrics, AlgorithmProfiler, NodeId,
};
use crate::config::DegreeSequenceConfig;
use crate::data_structures::graph::GraphError;

const PARAMETERS: &[&str] = &["record_trace", "verify_result"];

/// What one reduction step did with the largest remaining degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionAction {
    /// The largest degree was zero and was dropped
    RemovedIsolated,
    /// The largest degree was removed and the next `degree` entries decremented
    Connected { degree: usize },
    /// The largest degree was negative; the sequence is not realizable
    NegativeDegree(i64),
    /// Fewer than `degree` entries remained after the largest one
    InsufficientNodes { degree: usize, remaining: usize },
}

impl ReductionAction {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReductionAction::NegativeDegree(_) | ReductionAction::InsufficientNodes { .. }
        )
    }
}

/// Immutable snapshot of one Havel-Hakimi iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionStep {
    /// 1-based iteration number
    pub step_index: usize,
    /// Remaining degrees as they stood when the iteration began
    pub sequence_before_sort: Vec<i64>,
    /// The same degrees in descending order
    pub sorted: Vec<i64>,
    pub action: ReductionAction,
}

/// Verdict and trace of one validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeSequenceReport {
    pub valid: bool,
    pub trace: Vec<ReductionStep>,
    pub metrics: AlgorithmMetrics,
}

/// Outcome of consuming one sorted sequence state
struct StepOutcome {
    action: ReductionAction,
    next: Option<Vec<i64>>,
}

/// Applies one reduction to a sequence already sorted in descending order
///
/// The previous state is consumed; `next` is `None` when the step proved the
/// sequence non-realizable.
fn reduce_sorted(mut sorted: Vec<i64>) -> StepOutcome {
    let largest = sorted[0];

    if largest < 0 {
        return StepOutcome {
            action: ReductionAction::NegativeDegree(largest),
            next: None,
        };
    }

    if largest == 0 {
        sorted.remove(0);
        return StepOutcome {
            action: ReductionAction::RemovedIsolated,
            next: Some(sorted),
        };
    }

    let degree = usize::try_from(largest).unwrap_or(usize::MAX);
    let remaining = sorted.len() - 1;
    if remaining < degree {
        return StepOutcome {
            action: ReductionAction::InsufficientNodes { degree, remaining },
            next: None,
        };
    }

    sorted.remove(0);
    for value in sorted.iter_mut().take(degree) {
        *value = value.saturating_sub(1);
    }

    StepOutcome {
        action: ReductionAction::Connected { degree },
        next: Some(sorted),
    }
}

/// Havel-Hakimi degree sequence validator
#[derive(Debug, Clone, Default)]
pub struct HavelHakimi {
    config: DegreeSequenceConfig,
}

impl HavelHakimi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DegreeSequenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DegreeSequenceConfig {
        &self.config
    }

    /// Runs the reduction to a verdict
    ///
    /// The sequence is consumed; callers that need the original must keep a copy.
    pub fn validate(&self, sequence: Vec<i64>) -> Result<DegreeSequenceReport, AlgorithmError> {
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        let original = if self.config.verify_result {
            Some(sequence.clone())
        } else {
            None
        };

        debug!("Havel-Hakimi on a sequence of {} degrees", sequence.len());

        let mut trace_steps = Vec::new();
        let mut current = sequence;
        let mut step_index = 0;

        let valid = loop {
            if current.is_empty() {
                break true;
            }

            step_index += 1;
            profiler.record_step();

            let sequence_before_sort = if self.config.record_trace {
                current.clone()
            } else {
                Vec::new()
            };

            current.sort_unstable_by(|a, b| b.cmp(a));
            let sorted = if self.config.record_trace {
                current.clone()
            } else {
                Vec::new()
            };

            let outcome = reduce_sorted(current);
            trace!("Step {}: {:?}", step_index, outcome.action);

            if !outcome.action.is_terminal() {
                profiler.record_node_exploration();
            }

            if self.config.record_trace {
                trace_steps.push(ReductionStep {
                    step_index,
                    sequence_before_sort,
                    sorted,
                    action: outcome.action,
                });
            }

            match outcome.next {
                Some(next) => current = next,
                None => break false,
            }
        };

        if let Some(original) = original {
            let expected = satisfies_erdos_gallai(&original);
            if expected != valid {
                return Err(AlgorithmError::VerificationFailed(format!(
                    "Havel-Hakimi verdict {} disagrees with Erdős–Gallai verdict {} for {:?}",
                    valid, expected, original
                )));
            }
        }

        profiler.stop();
        debug!("Havel-Hakimi finished after {} steps: valid = {}", step_index, valid);

        Ok(DegreeSequenceReport {
            valid,
            trace: trace_steps,
            metrics: profiler.get_metrics(),
        })
    }
}

impl Algorithm for HavelHakimi {
    type Input = Vec<i64>;
    type Output = DegreeSequenceReport;

    fn name(&self) -> &'static str {
        "Havel-Hakimi"
    }

    fn category(&self) -> &'static str {
        "degree_sequence"
    }

    fn description(&self) -> &'static str {
        "Havel-Hakimi reduction deciding whether an integer sequence is the degree sequence of a simple undirected graph, recording one snapshot per reduction step."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(n^2 log n)",
            space_complexity: "O(n^2) with trace, O(n) without",
        }
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "record_trace" => self.config.record_trace = parse_bool_parameter(name, value)?,
            "verify_result" => self.config.verify_result = parse_bool_parameter(name, value)?,
            _ => return Err(unknown_parameter(name, PARAMETERS)),
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "record_trace" => Some(self.config.record_trace.to_string()),
            "verify_result" => Some(self.config.verify_result.to_string()),
            _ => None,
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        PARAMETERS
            .iter()
            .filter_map(|name| self.get_parameter(name).map(|value| (name.to_string(), value)))
            .collect()
    }

    fn execute(&mut self, input: Vec<i64>) -> Result<DegreeSequenceReport, AlgorithmError> {
        self.validate(input)
    }
}

/// Erdős–Gallai test for graphic sequences
///
/// A non-negative sequence `d1 >= ... >= dn` with even sum is graphic iff for
/// every `k`: `sum(d1..dk) <= k(k-1) + sum(min(di, k) for i > k)`.
pub fn satisfies_erdos_gallai(sequence: &[i64]) -> bool {
    if sequence.iter().any(|&d| d < 0) {
        return false;
    }

    let mut sorted: Vec<i128> = sequence.iter().map(|&d| d as i128).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let total: i128 = sorted.iter().sum();
    if total % 2 != 0 {
        return false;
    }

    let mut prefix: i128 = 0;
    for k in 1..=sorted.len() {
        prefix += sorted[k - 1];
        let k_value = k as i128;
        let tail: i128 = sorted[k..].iter().map(|&d| d.min(k_value)).sum();
        if prefix > k_value * (k_value - 1) + tail {
            return false;
        }
    }

    true
}

/// Degree list of an undirected simple graph given by its edge list
///
/// Self-loops and repeated undirected edges are rejected, since the result
/// must describe a simple graph.
pub fn degree_sequence_of(node_count: usize, edges: &[(usize, usize)]) -> Result<Vec<i64>, GraphError> {
    let mut degrees = vec![0i64; node_count];
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(edges.len());

    for &(u, v) in edges {
        for node in [u, v] {
            if node >= node_count {
                return Err(GraphError::NodeOutOfRange { node, node_count });
            }
        }
        if u == v {
            return Err(GraphError::SelfLoop(NodeId(u)));
        }
        if !seen.insert((u.min(v), u.max(v))) {
            return Err(GraphError::DuplicateEdge {
                from: NodeId(u),
                to: NodeId(v),
            });
        }
        degrees[u] += 1;
        degrees[v] += 1;
    }

    Ok(degrees)
}

impl fmt::Display for ReductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Step {}: Degree sequence: {:?}", self.step_index, self.sequence_before_sort)?;
        write!(f, "     Sorted degree sequence: {:?}", self.sorted)
    }
}

impl fmt::Display for DegreeSequenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.trace {
            writeln!(f, "{}", step)?;
        }
        if self.valid {
            write!(f, "The degree sequence is valid for a simple graph.")
        } else {
            write!(f, "The degree sequence is not valid for a simple graph.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(sequence: &[i64]) -> DegreeSequenceReport {
        HavelHakimi::new().validate(sequence.to_vec()).unwrap()
    }

    #[test]
    fn test_star_like_sequence_is_valid() {
        assert!(validate(&[4, 3, 2, 2, 1, 1, 1, 1, 1]).valid);
    }

    #[test]
    fn test_complete_minus_matching_is_valid() {
        let report = validate(&[3, 3, 3, 3]);
        assert!(report.valid);
        assert_eq!(report.trace.len(), 4);
        assert_eq!(report.trace[0].action, ReductionAction::Connected { degree: 3 });
        assert_eq!(report.trace[1].sequence_before_sort, vec![2, 2, 2]);
    }

    #[test]
    fn test_even_sum_failing_erdos_gallai() {
        let report = validate(&[4, 4, 1, 1]);
        assert!(!report.valid);
        assert_eq!(
            report.trace.last().map(|step| step.action.clone()),
            Some(ReductionAction::InsufficientNodes { degree: 4, remaining: 3 })
        );
    }

    #[test]
    fn test_negative_produced_mid_reduction() {
        // [3, 3, 1, 1] -> [2, 0, 0] -> [-1, -1] after connecting the 2
        let report = validate(&[3, 3, 1, 1]);
        assert!(!report.valid);
        assert!(matches!(
            report.trace.last().map(|step| &step.action),
            Some(ReductionAction::NegativeDegree(_))
        ));
    }

    #[test]
    fn test_negative_input_is_a_verdict_not_an_error() {
        let report = validate(&[-1, 2]);
        assert!(!report.valid);
    }

    #[test]
    fn test_empty_and_all_zero_sequences() {
        let empty = validate(&[]);
        assert!(empty.valid);
        assert!(empty.trace.is_empty());

        let zeros = validate(&[0, 0, 0]);
        assert!(zeros.valid);
        assert!(zeros
            .trace
            .iter()
            .all(|step| step.action == ReductionAction::RemovedIsolated));
    }

    #[test]
    fn test_trace_records_unsorted_state_first() {
        let report = validate(&[1, 2, 1]);
        assert!(report.valid);
        assert_eq!(report.trace[0].step_index, 1);
        assert_eq!(report.trace[0].sequence_before_sort, vec![1, 2, 1]);
        assert_eq!(report.trace[0].sorted, vec![2, 1, 1]);
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let mut validator = HavelHakimi::new();
        validator.set_parameter("record_trace", "false").unwrap();
        let report = validator.execute(vec![2, 2, 2]).unwrap();
        assert!(report.valid);
        assert!(report.trace.is_empty());
        assert_eq!(report.metrics.steps_executed, 3);
    }

    #[test]
    fn test_verification_agrees() {
        let mut validator = HavelHakimi::new();
        validator.set_parameter("verify_result", "true").unwrap();
        for sequence in [vec![3, 3, 3, 3], vec![4, 4, 1, 1], vec![5, 1], vec![2, 2, 2, 1, 1]] {
            assert!(validator.execute(sequence).is_ok());
        }
    }

    #[test]
    fn test_parameter_validation() {
        let mut validator = HavelHakimi::new();
        assert_eq!(validator.get_parameter("record_trace").as_deref(), Some("true"));
        assert!(validator.set_parameter("record_trace", "yes").is_err());
        assert!(validator.set_parameter("unknown", "true").is_err());
        assert_eq!(validator.parameters().len(), 2);
    }

    #[test]
    fn test_erdos_gallai() {
        assert!(satisfies_erdos_gallai(&[3, 3, 3, 3]));
        assert!(satisfies_erdos_gallai(&[4, 3, 2, 2, 1, 1, 1, 1, 1]));
        assert!(!satisfies_erdos_gallai(&[4, 4, 1, 1]));
        assert!(!satisfies_erdos_gallai(&[1, 1, 1]));
        assert!(!satisfies_erdos_gallai(&[2, -2]));
        assert!(satisfies_erdos_gallai(&[]));
    }

    #[test]
    fn test_degree_sequence_of_edges() {
        let degrees = degree_sequence_of(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(degrees, vec![2, 2, 3, 1]);
        assert!(validate(&degrees).valid);

        assert_eq!(
            degree_sequence_of(2, &[(1, 1)]),
            Err(GraphError::SelfLoop(NodeId(1)))
        );
        assert!(matches!(
            degree_sequence_of(3, &[(0, 1), (1, 0)]),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            degree_sequence_of(2, &[(0, 5)]),
            Err(GraphError::NodeOutOfRange { node: 5, node_count: 2 })
        ));
    }

    #[test]
    fn test_transcript_rendering() {
        let text = validate(&[1, 1]).to_string();
        assert!(text.starts_with("Step 1: Degree sequence: [1, 1]\n     Sorted degree sequence: [1, 1]"));
        assert!(text.ends_with("The degree sequence is valid for a simple graph."));
    }
}
