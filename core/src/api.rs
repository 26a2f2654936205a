//! Entry points for presentation layers
//!
//! The free functions take plain integers and return plain structured results
//! with default settings. `Toolkit` carries a `ToolkitConfig` and returns the
//! full engine results, including metrics, edge flows and minimum cuts.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::degree_sequence::{DegreeSequenceReport, HavelHakimi};
use crate::algorithm::graph::max_flow::{FlowInput, MaxFlowResult, MaxFlowSolver};
use crate::algorithm::graph::scc::{SccDecomposition, StronglyConnectedComponents};
use crate::algorithm::traits::AlgorithmError;
use crate::config::ToolkitConfig;
use crate::data_structures::graph::{CapacitatedEdge, EdgeList};

/// One augmenting path as node ids plus the flow it carried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    pub nodes: Vec<usize>,
    pub bottleneck: u64,
}

/// Total flow plus the augmenting paths in application order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total_flow: u64,
    pub paths: Vec<PathSummary>,
}

impl From<&MaxFlowResult> for FlowSummary {
    fn from(result: &MaxFlowResult) -> Self {
        Self {
            total_flow: result.total_flow,
            paths: result
                .paths
                .iter()
                .map(|path| PathSummary {
                    nodes: path.nodes.iter().map(|n| n.as_usize()).collect(),
                    bottleneck: path.bottleneck,
                })
                .collect(),
        }
    }
}

/// Havel-Hakimi verdict and reduction trace for `sequence`
pub fn validate_degree_sequence(sequence: Vec<i64>) -> Result<DegreeSequenceReport, AlgorithmError> {
    HavelHakimi::new().validate(sequence)
}

/// Strongly connected components of a directed graph, in emission order
pub fn decompose_scc(node_count: usize, edges: &[(usize, usize)]) -> Result<Vec<BTreeSet<usize>>, AlgorithmError> {
    let input = EdgeList::new(node_count, edges.to_vec());
    Ok(StronglyConnectedComponents::new().decompose(&input)?.node_sets())
}

/// Maximum flow from `source` to `sink` with its augmenting paths
pub fn compute_max_flow(
    node_count: usize,
    edges: &[(usize, usize, i64)],
    source: usize,
    sink: usize,
) -> Result<FlowSummary, AlgorithmError> {
    let input = FlowInput::new(
        node_count,
        edges.iter().copied().map(CapacitatedEdge::from).collect(),
        source,
        sink,
    );
    let result = MaxFlowSolver::new().compute(&input)?;
    Ok(FlowSummary::from(&result))
}

/// Configured access to all three engines
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    config: ToolkitConfig,
}

impl Toolkit {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    /// Builds a toolkit from a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, AlgorithmError> {
        Ok(Self::new(ToolkitConfig::from_json_str(json)?))
    }

    /// Builds a toolkit from a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AlgorithmError> {
        Ok(Self::new(ToolkitConfig::from_path(path)?))
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn validate_degree_sequence(&self, sequence: Vec<i64>) -> Result<DegreeSequenceReport, AlgorithmError> {
        HavelHakimi::with_config(self.config.degree_sequence.clone()).validate(sequence)
    }

    pub fn decompose_scc(&self, input: &EdgeList) -> Result<SccDecomposition, AlgorithmError> {
        StronglyConnectedComponents::with_config(self.config.scc.clone()).decompose(input)
    }

    pub fn compute_max_flow(&self, input: &FlowInput) -> Result<MaxFlowResult, AlgorithmError> {
        MaxFlowSolver::with_config(self.config.max_flow.clone()).compute(input)
    }
}
