//! Core algorithm trait definitions for the graphwork toolkit
//!
//! This module establishes the shared vocabulary of the three algorithm
//! engines: strongly typed node identifiers, the `Algorithm` trait with its
//! string parameter surface, the error taxonomy, and execution metrics.
//!
//! # Key Design Principles
//! - Every engine is stateless between calls: `execute` consumes its input
//!   and returns an owned result
//! - Boundary validation failures are errors, algorithmic verdicts are not
//! - Parameters are exposed as strings so that presentation layers can
//!   configure engines without knowing their concrete types

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::data_structures::graph::GraphError;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comprehensive error types for algorithm operations
///
/// A non-realizable degree sequence or a zero flow is never reported
/// through this type; those are ordinary results.
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Malformed graph input: {0}")]
    MalformedGraph(#[from] GraphError),

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Source and sink are the same node: {0}")]
    SourceIsSink(NodeId),

    #[error("Result verification failed: {0}")]
    VerificationFailed(String),

    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Execution error: {0}")]
    ExecutionError(String),
}

impl AlgorithmError {
    /// True for failures caused by the caller's input rather than the engine
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            AlgorithmError::MalformedGraph(_)
                | AlgorithmError::InvalidNode(_)
                | AlgorithmError::SourceIsSink(_)
        )
    }
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub steps_executed: usize,
    pub nodes_explored: usize,
    pub edges_examined: usize,
    pub execution_time: Duration,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Input consumed by one invocation
    type Input;

    /// Owned result of one invocation
    type Output;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., degree_sequence, max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's formal description
    fn description(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Returns every supported parameter with its current value
    fn parameters(&self) -> HashMap<String, String>;

    /// Runs the algorithm to completion on `input`
    fn execute(&mut self, input: Self::Input) -> Result<Self::Output, AlgorithmError>;
}

/// Parses a `true`/`false` parameter value
pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("Invalid boolean value: {}. Use 'true' or 'false'", value),
        }),
    }
}

/// Builds the error returned for a parameter name an algorithm does not know
pub(crate) fn unknown_parameter(name: &str, valid: &[&str]) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        name: name.to_string(),
        reason: format!("Unknown parameter. Valid parameters: {}", valid.join(", ")),
    }
}

/// Performance profiling integration
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            metrics: AlgorithmMetrics::default(),
            start_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_node_exploration(&mut self) {
        self.metrics.nodes_explored += 1;
    }

    pub fn record_edge_examination(&mut self) {
        self.metrics.edges_examined += 1;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}
