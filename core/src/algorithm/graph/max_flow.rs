//! Maximum Flow Algorithm Implementation
//!
//! This module implements the Ford-Fulkerson method with breadth-first
//! augmenting path selection (Edmonds-Karp). Every iteration pushes flow along
//! a shortest residual path, which bounds the number of augmentations by
//! O(V·E) and guarantees termination on integer capacities.
//!
//! # Residual Graph
//!
//! Each original edge is stored next to its reverse edge: forward edges live
//! at even indices, reverse edges at the following odd index, and each edge
//! stores the index of its partner. Pushing `δ` along an edge lowers its
//! residual by `δ` and raises the partner's residual by `δ`, so cancelling
//! previously sent flow costs O(1).
//!
//! # Invariants
//!
//! - `0 <= flow(u, v) <= capacity(u, v)` for every original edge
//! - Flow conservation at every node other than source and sink
//! - Every reported bottleneck is at least 1
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};
use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, unknown_parameter, Algorithm, AlgorithmComplexity, AlgorithmError,
    AlgorithmMetrics, AlgorithmProfiler, NodeId,
};
use crate::config::MaxFlowConfig;
use crate::data_structures::graph::{validate_capacitated_edges, CapacitatedEdge, GraphError, ValidatedEdge};

/// Flow capacity type
pub type Capacity = u64;

/// Flow value type
pub type Flow = u64;

const PARAMETERS: &[&str] = &["record_trace", "verify_result", "self_loops", "parallel_edges"];

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source vertex
    pub from: NodeId,
    /// Target vertex
    pub to: NodeId,
    /// Original edge capacity; zero for reverse edges
    pub capacity: Capacity,
    /// Capacity still available in this direction
    pub residual: Capacity,
    /// Index of the paired edge in the opposite direction
    pub reverse_edge_index: usize,
}

impl FlowEdge {
    /// Forward edges sit at even indices, their reverse partners at odd ones
    #[inline]
    pub fn is_forward(index: usize) -> bool {
        index % 2 == 0
    }

    /// Flow currently carried by a forward edge; always zero on reverse edges
    pub fn flow(&self) -> Flow {
        self.capacity.saturating_sub(self.residual)
    }
}

/// Flow network representation with paired residual edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// Number of vertices in network
    vertex_count: usize,
    /// Adjacency list of edge indices, forward and reverse
    adjacency: Vec<Vec<usize>>,
    /// All edges in the network
    edges: Vec<FlowEdge>,
}

impl FlowNetwork {
    /// Create new flow network with specified vertex count
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    /// Builds a network from edges that already passed boundary validation
    pub fn from_validated(vertex_count: usize, edges: &[ValidatedEdge]) -> Result<Self, GraphError> {
        let mut network = Self::new(vertex_count);
        for edge in edges {
            network.add_edge(edge.from, edge.to, edge.capacity)?;
        }
        Ok(network)
    }

    /// Add edge to flow network with its zero-capacity reverse partner
    ///
    /// Returns the index of the forward edge.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> Result<usize, GraphError> {
        for node in [from, to] {
            if node.as_usize() >= self.vertex_count {
                return Err(GraphError::NodeOutOfRange {
                    node: node.as_usize(),
                    node_count: self.vertex_count,
                });
            }
        }

        let forward_edge_index = self.edges.len();
        let reverse_edge_index = forward_edge_index + 1;

        self.edges.push(FlowEdge {
            from,
            to,
            capacity,
            residual: capacity,
            reverse_edge_index,
        });
        self.edges.push(FlowEdge {
            from: to,
            to: from,
            capacity: 0,
            residual: 0,
            reverse_edge_index: forward_edge_index,
        });

        self.adjacency[from.as_usize()].push(forward_edge_index);
        self.adjacency[to.as_usize()].push(reverse_edge_index);

        Ok(forward_edge_index)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Original edge at `index`; `None` for reverse edges and unknown indices
    pub fn edge(&self, index: usize) -> Option<&FlowEdge> {
        if FlowEdge::is_forward(index) {
            self.edges.get(index)
        } else {
            None
        }
    }

    /// Original (forward) edges with their indices
    pub fn forward_edges(&self) -> impl Iterator<Item = (usize, &FlowEdge)> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(index, _)| FlowEdge::is_forward(*index))
    }

    /// Sends `amount` along edge `index`, crediting the paired edge
    fn push(&mut self, index: usize, amount: Flow) {
        let reverse = self.edges[index].reverse_edge_index;
        self.edges[index].residual -= amount;
        self.edges[reverse].residual += amount;
    }

    /// Breadth-first search over edges with positive residual capacity
    ///
    /// Returns the edge indices of a shortest source-to-sink path, or `None`
    /// when the sink is unreachable.
    fn shortest_augmenting_path(
        &self,
        source: NodeId,
        sink: NodeId,
        profiler: &mut AlgorithmProfiler,
    ) -> Option<Vec<usize>> {
        let mut parent_edge: Vec<Option<usize>> = vec![None; self.vertex_count];
        let mut visited = vec![false; self.vertex_count];
        let mut queue = VecDeque::new();

        visited[source.as_usize()] = true;
        queue.push_back(source);

        'search: while let Some(u) = queue.pop_front() {
            profiler.record_node_exploration();
            for &index in &self.adjacency[u.as_usize()] {
                profiler.record_edge_examination();
                let edge = &self.edges[index];
                let v = edge.to.as_usize();
                if edge.residual > 0 && !visited[v] {
                    visited[v] = true;
                    parent_edge[v] = Some(index);
                    if edge.to == sink {
                        break 'search;
                    }
                    queue.push_back(edge.to);
                }
            }
        }

        if !visited[sink.as_usize()] {
            return None;
        }

        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let index = parent_edge[current.as_usize()]?;
            path.push(index);
            current = self.edges[index].from;
        }
        path.reverse();
        Some(path)
    }

    /// Nodes reachable from `source` through positive residual capacity
    pub fn residual_reachable(&self, source: NodeId) -> Vec<bool> {
        let mut visited = vec![false; self.vertex_count];
        if source.as_usize() >= self.vertex_count {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[source.as_usize()] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &index in &self.adjacency[u.as_usize()] {
                let edge = &self.edges[index];
                if edge.residual > 0 && !visited[edge.to.as_usize()] {
                    visited[edge.to.as_usize()] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        visited
    }

    /// Final flow on every original edge
    pub fn edge_flows(&self) -> Vec<EdgeFlow> {
        self.forward_edges()
            .map(|(_, edge)| EdgeFlow {
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
                flow: edge.flow(),
            })
            .collect()
    }

    /// Minimum cut induced by residual reachability from `source`
    pub fn min_cut(&self, source: NodeId) -> MinCut {
        let reachable = self.residual_reachable(source);
        let source_side = (0..self.vertex_count)
            .filter(|&v| reachable[v])
            .map(NodeId)
            .collect();

        let cut_edges: Vec<EdgeFlow> = self
            .forward_edges()
            .filter(|(_, edge)| reachable[edge.from.as_usize()] && !reachable[edge.to.as_usize()])
            .map(|(_, edge)| EdgeFlow {
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
                flow: edge.flow(),
            })
            .collect();

        let capacity = cut_edges
            .iter()
            .fold(0u128, |acc, edge| acc + u128::from(edge.capacity));

        MinCut {
            source_side,
            cut_edges,
            capacity,
        }
    }
}

/// State of one original edge right after an augmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: NodeId,
    pub to: NodeId,
    /// Flow on the original edge after the augmentation
    pub flow: Flow,
    /// Residual capacity on the original edge after the augmentation
    pub residual: Capacity,
    /// The path traversed this edge backwards, returning flow
    pub cancelled: bool,
}

/// Source-to-sink path found by one BFS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    pub nodes: Vec<NodeId>,
    pub bottleneck: Flow,
    pub edges: Vec<EdgeSnapshot>,
}

impl AugmentingPath {
    /// Consecutive node pairs along the path
    pub fn node_pairs(&self) -> Vec<(usize, usize)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_usize(), pair[1].as_usize()))
            .collect()
    }
}

/// Flow carried by one original edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
    pub flow: Flow,
}

/// Saturated cut separating source from sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Nodes reachable from the source in the final residual graph
    pub source_side: Vec<NodeId>,
    /// Original edges leaving the source side
    pub cut_edges: Vec<EdgeFlow>,
    pub capacity: u128,
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub total_flow: Flow,
    /// Augmenting paths in the order they were applied
    pub paths: Vec<AugmentingPath>,
    pub edge_flows: Vec<EdgeFlow>,
    pub min_cut: MinCut,
    /// Number of augmentations, recorded even when the trace is disabled
    pub augmentations: usize,
    pub metrics: AlgorithmMetrics,
}

/// Maximum flow problem as supplied by callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowInput {
    pub node_count: usize,
    pub edges: Vec<CapacitatedEdge>,
    pub source: usize,
    pub sink: usize,
}

impl FlowInput {
    pub fn new(node_count: usize, edges: Vec<CapacitatedEdge>, source: usize, sink: usize) -> Self {
        Self {
            node_count,
            edges,
            source,
            sink,
        }
    }
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: MaxFlowConfig,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MaxFlowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaxFlowConfig {
        &self.config
    }

    /// Checks endpoints and edges, then builds the residual network
    pub fn build_network(&self, input: &FlowInput) -> Result<FlowNetwork, AlgorithmError> {
        for endpoint in [input.source, input.sink] {
            if endpoint >= input.node_count {
                return Err(AlgorithmError::InvalidNode(NodeId(endpoint)));
            }
        }
        if input.source == input.sink {
            return Err(AlgorithmError::SourceIsSink(NodeId(input.source)));
        }

        let edges = validate_capacitated_edges(
            input.node_count,
            &input.edges,
            self.config.self_loops,
            self.config.parallel_edges,
        )?;
        Ok(FlowNetwork::from_validated(input.node_count, &edges)?)
    }

    /// Validates the input and computes a maximum flow
    pub fn compute(&self, input: &FlowInput) -> Result<MaxFlowResult, AlgorithmError> {
        let mut network = self.build_network(input)?;
        self.solve(&mut network, NodeId(input.source), NodeId(input.sink))
    }

    /// Runs Edmonds-Karp on `network`, leaving the final residual state in place
    pub fn solve(
        &self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        for endpoint in [source, sink] {
            if endpoint.as_usize() >= network.vertex_count() {
                return Err(AlgorithmError::InvalidNode(endpoint));
            }
        }
        if source == sink {
            return Err(AlgorithmError::SourceIsSink(source));
        }

        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        debug!(
            "Edmonds-Karp from {} to {} on {} nodes and {} edges",
            source,
            sink,
            network.vertex_count(),
            network.edges.len() / 2
        );

        let mut total_flow: Flow = 0;
        let mut paths = Vec::new();
        let mut augmentations = 0;

        while let Some(path_edges) = network.shortest_augmenting_path(source, sink, &mut profiler) {
            profiler.record_step();

            let bottleneck = path_edges
                .iter()
                .map(|&index| network.edges[index].residual)
                .min()
                .ok_or_else(|| AlgorithmError::ExecutionError("Empty augmenting path".to_string()))?;

            for &index in &path_edges {
                network.push(index, bottleneck);
            }

            total_flow = total_flow.checked_add(bottleneck).ok_or_else(|| {
                AlgorithmError::ExecutionError("Total flow overflows a 64-bit integer".to_string())
            })?;
            augmentations += 1;

            let mut nodes = Vec::with_capacity(path_edges.len() + 1);
            nodes.push(source);
            nodes.extend(path_edges.iter().map(|&index| network.edges[index].to));
            trace!("Augmenting path {:?} carries {}", nodes, bottleneck);

            if self.config.record_trace {
                let residual_view: &FlowNetwork = network;
                let edges = path_edges
                    .iter()
                    .map(|&index| snapshot(residual_view, index))
                    .collect();
                paths.push(AugmentingPath {
                    nodes,
                    bottleneck,
                    edges,
                });
            }
        }

        profiler.stop();

        let result = MaxFlowResult {
            total_flow,
            paths,
            edge_flows: network.edge_flows(),
            min_cut: network.min_cut(source),
            augmentations,
            metrics: profiler.get_metrics(),
        };

        debug!(
            "Edmonds-Karp finished: max flow {} after {} augmentations",
            total_flow, augmentations
        );

        if self.config.verify_result {
            verify_flow(network, source, sink, &result)?;
        }

        Ok(result)
    }
}

/// Snapshot of the original edge behind residual edge `index`
fn snapshot(network: &FlowNetwork, index: usize) -> EdgeSnapshot {
    let cancelled = !FlowEdge::is_forward(index);
    let forward = if cancelled {
        &network.edges[network.edges[index].reverse_edge_index]
    } else {
        &network.edges[index]
    };

    EdgeSnapshot {
        from: forward.from,
        to: forward.to,
        flow: forward.flow(),
        residual: forward.residual,
        cancelled,
    }
}

/// Checks capacity bounds, conservation, optimality and cut duality
pub fn verify_flow(
    network: &FlowNetwork,
    source: NodeId,
    sink: NodeId,
    result: &MaxFlowResult,
) -> Result<(), AlgorithmError> {
    let fail = |message: String| {
        warn!("Max flow verification failed: {}", message);
        Err(AlgorithmError::VerificationFailed(message))
    };

    for endpoint in [source, sink] {
        if endpoint.as_usize() >= network.vertex_count() {
            return fail(format!("Node {} is not in the network", endpoint));
        }
    }

    let mut net_outflow = vec![0i128; network.vertex_count()];
    for (index, edge) in network.forward_edges() {
        if edge.residual > edge.capacity {
            return fail(format!("Edge {} -> {} carries negative flow", edge.from, edge.to));
        }
        let reverse = &network.edges[edge.reverse_edge_index];
        if reverse.residual != edge.flow() {
            return fail(format!("Edge {} has an unpaired reverse residual", index));
        }
        let flow = i128::from(edge.flow());
        net_outflow[edge.from.as_usize()] += flow;
        net_outflow[edge.to.as_usize()] -= flow;
    }

    for (node, &net) in net_outflow.iter().enumerate() {
        if node != source.as_usize() && node != sink.as_usize() && net != 0 {
            return fail(format!("Flow is not conserved at node {}", node));
        }
    }

    let total = i128::from(result.total_flow);
    if net_outflow[source.as_usize()] != total || net_outflow[sink.as_usize()] != -total {
        return fail(format!(
            "Source outflow {} and sink inflow {} do not match total {}",
            net_outflow[source.as_usize()],
            -net_outflow[sink.as_usize()],
            total
        ));
    }

    if network.residual_reachable(source)[sink.as_usize()] {
        return fail("An augmenting path remains".to_string());
    }

    if result.min_cut.capacity != u128::from(result.total_flow) {
        return fail(format!(
            "Cut capacity {} differs from total flow {}",
            result.min_cut.capacity, result.total_flow
        ));
    }

    Ok(())
}

impl Algorithm for MaxFlowSolver {
    type Input = FlowInput;
    type Output = MaxFlowResult;

    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> &'static str {
        "Ford-Fulkerson maximum flow with breadth-first shortest augmenting paths, recording every augmenting path with its bottleneck and edge snapshots."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * E^2)",
            space_complexity: "O(V + E)",
        }
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        let invalid = |reason: String| AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason,
        };
        match name {
            "record_trace" => self.config.record_trace = parse_bool_parameter(name, value)?,
            "verify_result" => self.config.verify_result = parse_bool_parameter(name, value)?,
            "self_loops" => self.config.self_loops = value.parse().map_err(invalid)?,
            "parallel_edges" => self.config.parallel_edges = value.parse().map_err(invalid)?,
            _ => return Err(unknown_parameter(name, PARAMETERS)),
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "record_trace" => Some(self.config.record_trace.to_string()),
            "verify_result" => Some(self.config.verify_result.to_string()),
            "self_loops" => Some(self.config.self_loops.to_string()),
            "parallel_edges" => Some(self.config.parallel_edges.to_string()),
            _ => None,
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        PARAMETERS
            .iter()
            .filter_map(|name| self.get_parameter(name).map(|value| (name.to_string(), value)))
            .collect()
    }

    fn execute(&mut self, input: FlowInput) -> Result<MaxFlowResult, AlgorithmError> {
        self.compute(&input)
    }
}

impl fmt::Display for MaxFlowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.paths {
            let nodes: Vec<usize> = path.nodes.iter().map(|n| n.as_usize()).collect();
            writeln!(f, "Nodes Sequence in Final Path: {:?}", nodes)?;
            writeln!(f, "Edges Involved in Final Path: {:?}", path.node_pairs())?;
        }
        write!(f, "Max Flow: {}", self.total_flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(node_count: usize, edges: &[(usize, usize, i64)], source: usize, sink: usize) -> FlowInput {
        FlowInput::new(
            node_count,
            edges.iter().copied().map(CapacitatedEdge::from).collect(),
            source,
            sink,
        )
    }

    fn verified() -> MaxFlowSolver {
        let mut solver = MaxFlowSolver::new();
        solver.set_parameter("verify_result", "true").unwrap();
        solver
    }

    #[test]
    fn test_flow_network_creation() {
        let mut network = FlowNetwork::new(4);
        network.add_edge(NodeId(0), NodeId(1), 10).unwrap();
        network.add_edge(NodeId(1), NodeId(2), 5).unwrap();
        network.add_edge(NodeId(2), NodeId(3), 8).unwrap();

        assert_eq!(network.vertex_count(), 4);
        assert_eq!(network.edges.len(), 6); // 3 forward + 3 reverse edges
        assert_eq!(network.edge(0).map(|e| e.reverse_edge_index), Some(1));
        assert!(network.edge(1).is_none());
        assert!(network.edge(6).is_none());
        assert!(network.add_edge(NodeId(0), NodeId(9), 1).is_err());
    }

    #[test]
    fn test_push_credits_reverse_edge() {
        let mut network = FlowNetwork::new(2);
        let index = network.add_edge(NodeId(0), NodeId(1), 10).unwrap();
        network.push(index, 4);
        assert_eq!(network.edges[index].residual, 6);
        assert_eq!(network.edges[index].flow(), 4);
        assert_eq!(network.edges[index + 1].residual, 4);
    }

    #[test]
    fn test_edge_lookup_after_solve() {
        let solver = MaxFlowSolver::new();
        let mut network = solver.build_network(&input(2, &[(0, 1, 5)], 0, 1)).unwrap();
        solver.solve(&mut network, NodeId(0), NodeId(1)).unwrap();

        assert!(network.edge(1).is_none());
        assert_eq!(network.edge(0).map(|e| e.flow()), Some(5));

        let reverse = &network.edges[1];
        assert_eq!(reverse.residual, 5);
        assert_eq!(reverse.flow(), 0);
    }

    #[test]
    fn test_verification_rejects_foreign_endpoints() {
        let solver = MaxFlowSolver::new();
        let mut network = solver.build_network(&input(2, &[(0, 1, 5)], 0, 1)).unwrap();
        let result = solver.solve(&mut network, NodeId(0), NodeId(1)).unwrap();
        assert!(matches!(
            verify_flow(&network, NodeId(0), NodeId(7), &result),
            Err(AlgorithmError::VerificationFailed(_))
        ));
    }

    #[test]
    fn test_diamond_network() {
        let result = verified()
            .compute(&input(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)], 0, 3))
            .unwrap();

        assert_eq!(result.total_flow, 4);
        assert_eq!(result.paths.len(), 2);
        assert!(result.paths.iter().all(|p| p.bottleneck >= 1));
        assert_eq!(result.paths[0].nodes, vec![NodeId(0), NodeId(1), NodeId(3)]);
        assert_eq!(result.min_cut.capacity, 4);
    }

    #[test]
    fn test_flow_cancellation() {
        // The first shortest path 0-1-2-5 blocks node 3; the second path
        // must return flow along 1 -> 2 to reach the sink through 4.
        let result = verified()
            .compute(&input(
                6,
                &[(0, 1, 1), (1, 2, 1), (2, 5, 1), (0, 3, 1), (3, 2, 1), (1, 4, 1), (4, 5, 1)],
                0,
                5,
            ))
            .unwrap();

        assert_eq!(result.total_flow, 2);
        assert_eq!(result.paths[0].nodes, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(5)]);

        let second = &result.paths[1];
        assert_eq!(
            second.nodes,
            vec![NodeId(0), NodeId(3), NodeId(2), NodeId(1), NodeId(4), NodeId(5)]
        );
        let cancelled: Vec<&EdgeSnapshot> = second.edges.iter().filter(|e| e.cancelled).collect();
        assert_eq!(cancelled.len(), 1);
        assert_eq!((cancelled[0].from, cancelled[0].to), (NodeId(1), NodeId(2)));
        assert_eq!(cancelled[0].flow, 0);

        let middle = result
            .edge_flows
            .iter()
            .find(|e| e.from == NodeId(1) && e.to == NodeId(2))
            .unwrap();
        assert_eq!(middle.flow, 0);
    }

    #[test]
    fn test_disconnected_is_zero_flow() {
        let result = verified()
            .compute(&input(4, &[(0, 1, 10), (2, 3, 5)], 0, 3))
            .unwrap();
        assert_eq!(result.total_flow, 0);
        assert!(result.paths.is_empty());
        assert_eq!(result.min_cut.source_side, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_zero_capacity_edges_are_skipped() {
        let result = MaxFlowSolver::new()
            .compute(&input(3, &[(0, 1, 0), (1, 2, 7)], 0, 2))
            .unwrap();
        assert_eq!(result.total_flow, 0);
    }

    #[test]
    fn test_classic_network() {
        let result = verified()
            .compute(&input(
                6,
                &[
                    (0, 1, 16),
                    (0, 2, 13),
                    (1, 2, 10),
                    (2, 1, 4),
                    (1, 3, 12),
                    (3, 2, 9),
                    (2, 4, 14),
                    (4, 3, 7),
                    (3, 5, 20),
                    (4, 5, 4),
                ],
                0,
                5,
            ))
            .unwrap();
        assert_eq!(result.total_flow, 23);
    }

    #[test]
    fn test_boundary_errors() {
        let solver = MaxFlowSolver::new();

        let same = solver.compute(&input(2, &[(0, 1, 1)], 1, 1));
        assert!(matches!(same, Err(AlgorithmError::SourceIsSink(NodeId(1)))));

        let out_of_range = solver.compute(&input(2, &[(0, 1, 1)], 0, 2));
        assert!(matches!(out_of_range, Err(AlgorithmError::InvalidNode(NodeId(2)))));

        let negative = solver.compute(&input(2, &[(0, 1, -3)], 0, 1));
        assert!(matches!(
            negative,
            Err(AlgorithmError::MalformedGraph(GraphError::NegativeCapacity { .. }))
        ));

        let self_loop = solver.compute(&input(2, &[(0, 0, 1), (0, 1, 1)], 0, 1));
        assert!(matches!(
            self_loop,
            Err(AlgorithmError::MalformedGraph(GraphError::SelfLoop(_)))
        ));
    }

    #[test]
    fn test_parallel_edges_sum_by_default() {
        let result = MaxFlowSolver::new()
            .compute(&input(2, &[(0, 1, 2), (0, 1, 3)], 0, 1))
            .unwrap();
        assert_eq!(result.total_flow, 5);

        let mut strict = MaxFlowSolver::new();
        strict.set_parameter("parallel_edges", "reject").unwrap();
        assert!(strict.execute(input(2, &[(0, 1, 2), (0, 1, 3)], 0, 1)).is_err());
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let mut solver = MaxFlowSolver::new();
        solver.set_parameter("record_trace", "false").unwrap();
        let result = solver
            .execute(input(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)], 0, 3))
            .unwrap();
        assert_eq!(result.total_flow, 4);
        assert!(result.paths.is_empty());
        assert_eq!(result.augmentations, 2);
    }

    #[test]
    fn test_verification_rejects_tampered_result() {
        let solver = MaxFlowSolver::new();
        let mut network = solver
            .build_network(&input(3, &[(0, 1, 5), (1, 2, 5)], 0, 2))
            .unwrap();
        let mut result = solver.solve(&mut network, NodeId(0), NodeId(2)).unwrap();
        assert!(verify_flow(&network, NodeId(0), NodeId(2), &result).is_ok());

        result.total_flow = 4;
        assert!(matches!(
            verify_flow(&network, NodeId(0), NodeId(2), &result),
            Err(AlgorithmError::VerificationFailed(_))
        ));
    }

    #[test]
    fn test_parameter_validation() {
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.get_parameter("parallel_edges").as_deref(), Some("sum_capacities"));
        assert!(solver.set_parameter("capacity_scaling_factor", "2.0").is_err());
        assert!(solver.set_parameter("self_loops", "keep").is_err());
        assert_eq!(solver.parameters().len(), 4);
    }

    #[test]
    fn test_display() {
        let result = MaxFlowSolver::new()
            .compute(&input(3, &[(0, 1, 2), (1, 2, 1)], 0, 2))
            .unwrap();
        assert_eq!(
            result.to_string(),
            "Nodes Sequence in Final Path: [0, 1, 2]\nEdges Involved in Final Path: [(0, 1), (1, 2)]\nMax Flow: 1"
        );
    }
}
