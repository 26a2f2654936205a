//! Strongly Connected Components Algorithm Implementation
//!
//! This module implements Tarjan's algorithm for finding strongly connected components
//! in directed graphs in a single depth-first traversal with O(V+E) time complexity.
//!
//! # Theoretical Foundation
//!
//! A strongly connected component (SCC) is a maximal set of vertices such that there
//! is a directed path from each vertex to every other vertex in the component.
//!
//! ## Invariants
//!
//! 1. **Discovery Time Property**: Each vertex has a unique discovery index during DFS
//! 2. **Low-Link Property**: low[v] is the smallest discovery index reachable from v
//!    through its DFS subtree plus one edge to a vertex still on the stack
//! 3. **SCC Root Property**: A vertex v is the root of an SCC iff disc[v] == low[v]
//! 4. **Stack Property**: Vertices of an SCC appear consecutively on the Tarjan stack
//!
//! # Traversal
//!
//! The depth-first search runs on an explicit, heap-allocated work stack of
//! frames `(node, next_edge)`, so a long directed chain cannot exhaust the
//! native call stack.
//!
//! # Output Order
//!
//! Components are emitted as they close, which is a reverse topological order
//! of the condensation: every component appears after all components it has
//! edges into. Component ids follow emission order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, unknown_parameter, Algorithm, AlgorithmComplexity, AlgorithmError,
    AlgorithmMetrics, AlgorithmProfiler, NodeId,
};
use crate::config::SccConfig;
use crate::data_structures::graph::{DirectedGraph, EdgeList};

const PARAMETERS: &[&str] = &["verify_result", "self_loops", "parallel_edges"];

/// Strongly Connected Component representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StronglyConnectedComponent {
    /// Emission index of this component
    pub id: usize,
    /// Vertices in the order they were popped from the Tarjan stack
    pub vertices: Vec<NodeId>,
    /// Root vertex (first discovered vertex of the component)
    pub root: NodeId,
}

impl StronglyConnectedComponent {
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Check if this component contains a specific vertex
    pub fn contains(&self, vertex: NodeId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Get the vertices in this component as a hash set for O(1) lookup
    pub fn vertex_set(&self) -> HashSet<NodeId> {
        self.vertices.iter().copied().collect()
    }

    /// Check if this is a trivial component (single vertex with no self-loop)
    pub fn is_trivial(&self, graph: &DirectedGraph) -> bool {
        self.size() == 1 && !graph.has_edge(self.root, self.root)
    }
}

/// Tarjan's algorithm state for SCC computation
#[derive(Debug)]
struct TarjanState {
    /// Discovery index for each vertex, `None` until visited
    discovery: Vec<Option<usize>>,
    /// Low-link value for each vertex
    low_link: Vec<usize>,
    /// Vertices on the Tarjan stack
    on_stack: Vec<bool>,
    stack: Vec<NodeId>,
    next_index: usize,
    components: Vec<StronglyConnectedComponent>,
    component_of: Vec<usize>,
}

impl TarjanState {
    fn new(node_count: usize) -> Self {
        Self {
            discovery: vec![None; node_count],
            low_link: vec![0; node_count],
            on_stack: vec![false; node_count],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
            component_of: vec![usize::MAX; node_count],
        }
    }

    fn is_visited(&self, vertex: NodeId) -> bool {
        self.discovery[vertex.as_usize()].is_some()
    }

    /// Assigns the next discovery index and pushes the vertex on the Tarjan stack
    fn visit(&mut self, vertex: NodeId) {
        let index = self.next_index;
        self.next_index += 1;
        self.discovery[vertex.as_usize()] = Some(index);
        self.low_link[vertex.as_usize()] = index;
        self.stack.push(vertex);
        self.on_stack[vertex.as_usize()] = true;
    }

    fn lower_link(&mut self, vertex: NodeId, candidate: usize) {
        let low = &mut self.low_link[vertex.as_usize()];
        *low = (*low).min(candidate);
    }

    fn is_root(&self, vertex: NodeId) -> bool {
        self.discovery[vertex.as_usize()] == Some(self.low_link[vertex.as_usize()])
    }

    /// Pops the stack down to and including `root`, closing one component
    fn close_component(&mut self, root: NodeId) -> Result<(), AlgorithmError> {
        let id = self.components.len();
        let mut vertices = Vec::new();

        loop {
            let popped = self.stack.pop().ok_or_else(|| {
                AlgorithmError::ExecutionError("Stack underflow during SCC extraction".to_string())
            })?;
            self.on_stack[popped.as_usize()] = false;
            self.component_of[popped.as_usize()] = id;
            vertices.push(popped);
            if popped == root {
                break;
            }
        }

        trace!("Closed component {} rooted at {} with {} vertices", id, root, vertices.len());
        self.components.push(StronglyConnectedComponent { id, vertices, root });
        Ok(())
    }
}

/// One suspended DFS call: the vertex and the index of its next unexplored edge
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    next_edge: usize,
}

/// SCC computation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SccDecomposition {
    /// Components in emission order
    pub components: Vec<StronglyConnectedComponent>,
    /// Component id of every node
    pub component_of: Vec<usize>,
    /// Deepest DFS work stack reached
    pub max_dfs_depth: usize,
    pub metrics: AlgorithmMetrics,
}

impl SccDecomposition {
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn largest_component(&self) -> Option<&StronglyConnectedComponent> {
        self.components.iter().max_by_key(|c| c.size())
    }

    pub fn trivial_components(&self) -> usize {
        self.components.iter().filter(|c| c.size() == 1).count()
    }

    /// Component id of `vertex`, or `None` when it is not in the graph
    pub fn component_id(&self, vertex: NodeId) -> Option<usize> {
        self.component_of.get(vertex.as_usize()).copied()
    }

    /// Get component containing a specific vertex
    pub fn get_component_containing(&self, vertex: NodeId) -> Option<&StronglyConnectedComponent> {
        self.component_of
            .get(vertex.as_usize())
            .and_then(|&id| self.components.get(id))
    }

    /// Check if two vertices are in the same strongly connected component
    pub fn are_strongly_connected(&self, u: NodeId, v: NodeId) -> bool {
        match (self.component_of.get(u.as_usize()), self.component_of.get(v.as_usize())) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// True when the whole graph is one component
    pub fn is_strongly_connected(&self) -> bool {
        self.components.len() == 1
    }

    /// Node sets of every component, sorted, in emission order
    pub fn node_sets(&self) -> Vec<BTreeSet<usize>> {
        self.components
            .iter()
            .map(|c| c.vertices.iter().map(|v| v.as_usize()).collect())
            .collect()
    }

    /// Edges of the condensation DAG as `(component, component)` pairs, deduplicated and sorted
    ///
    /// Edges touching nodes this decomposition does not cover are skipped.
    pub fn condensation(&self, graph: &DirectedGraph) -> Vec<(usize, usize)> {
        let edges: BTreeSet<(usize, usize)> = graph
            .edges()
            .filter_map(|(u, v)| {
                let a = *self.component_of.get(u.as_usize())?;
                let b = *self.component_of.get(v.as_usize())?;
                (a != b).then_some((a, b))
            })
            .collect();
        edges.into_iter().collect()
    }

    /// Component ids in topological order of the condensation
    ///
    /// Tarjan closes a component only after every component it reaches, so
    /// reversing emission order is a topological order.
    pub fn topological_order(&self) -> Vec<usize> {
        (0..self.components.len()).rev().collect()
    }
}

/// Strongly Connected Components Algorithm Implementation
#[derive(Debug, Clone, Default)]
pub struct StronglyConnectedComponents {
    config: SccConfig,
}

impl StronglyConnectedComponents {
    /// Create a new SCC algorithm instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SccConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SccConfig {
        &self.config
    }

    /// Builds a graph from an edge list under this instance's edge policies
    pub fn build_graph(&self, input: &EdgeList) -> Result<DirectedGraph, AlgorithmError> {
        Ok(DirectedGraph::from_edges(
            input.node_count,
            &input.edges,
            self.config.self_loops,
            self.config.parallel_edges,
        )?)
    }

    /// Compute strongly connected components using Tarjan's algorithm
    pub fn compute_scc(&self, graph: &DirectedGraph) -> Result<SccDecomposition, AlgorithmError> {
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();

        debug!(
            "Tarjan SCC on {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let mut state = TarjanState::new(graph.node_count());
        let mut work: Vec<Frame> = Vec::new();
        let mut max_dfs_depth = 0;

        for root in graph.nodes() {
            if state.is_visited(root) {
                continue;
            }

            trace!("Starting DFS from {}", root);
            profiler.record_step();
            state.visit(root);
            profiler.record_node_exploration();
            work.push(Frame { node: root, next_edge: 0 });
            max_dfs_depth = max_dfs_depth.max(work.len());

            while let Some(frame) = work.last_mut() {
                let u = frame.node;

                if let Some(&v) = graph.neighbors(u).get(frame.next_edge) {
                    frame.next_edge += 1;
                    profiler.record_edge_examination();

                    match state.discovery[v.as_usize()] {
                        None => {
                            // Tree edge: descend
                            state.visit(v);
                            profiler.record_node_exploration();
                            work.push(Frame { node: v, next_edge: 0 });
                            max_dfs_depth = max_dfs_depth.max(work.len());
                        }
                        Some(v_discovery) if state.on_stack[v.as_usize()] => {
                            state.lower_link(u, v_discovery);
                        }
                        // Already in a closed component
                        Some(_) => {}
                    }
                    continue;
                }

                // All edges of u explored: return to the parent frame
                work.pop();
                if let Some(parent) = work.last() {
                    let u_low = state.low_link[u.as_usize()];
                    state.lower_link(parent.node, u_low);
                }

                if state.is_root(u) {
                    state.close_component(u)?;
                }
            }
        }

        profiler.stop();

        let result = SccDecomposition {
            components: state.components,
            component_of: state.component_of,
            max_dfs_depth,
            metrics: profiler.get_metrics(),
        };

        debug!("Tarjan SCC found {} components", result.num_components());

        if self.config.verify_result {
            verify_scc_result(graph, &result)?;
        }

        Ok(result)
    }

    /// Validates an edge list and decomposes it
    pub fn decompose(&self, input: &EdgeList) -> Result<SccDecomposition, AlgorithmError> {
        let graph = self.build_graph(input)?;
        self.compute_scc(&graph)
    }
}

/// Verify the correctness of the SCC result
///
/// Checks that:
/// 1. The decomposition belongs to a graph of this size and covers every vertex exactly once
/// 2. Each component is strongly connected
/// 3. Every condensation edge points from a later component to an earlier one,
///    which makes the condensation acyclic and the components maximal
pub fn verify_scc_result(graph: &DirectedGraph, result: &SccDecomposition) -> Result<(), AlgorithmError> {
    let total_vertices = graph.node_count();
    if result.component_of.len() != total_vertices {
        return Err(AlgorithmError::VerificationFailed(format!(
            "Decomposition covers {} nodes but the graph has {}",
            result.component_of.len(),
            total_vertices
        )));
    }

    let mut covered = vec![false; total_vertices];

    for component in &result.components {
        for &vertex in &component.vertices {
            let slot = covered.get_mut(vertex.as_usize()).ok_or_else(|| {
                AlgorithmError::VerificationFailed(format!("Vertex {} is not in the graph", vertex))
            })?;
            if *slot {
                return Err(AlgorithmError::VerificationFailed(format!(
                    "Vertex {} appears in multiple components",
                    vertex
                )));
            }
            *slot = true;
        }
    }

    if let Some(missing) = covered.iter().position(|&c| !c) {
        return Err(AlgorithmError::VerificationFailed(format!(
            "Vertex {} is not covered by any component",
            missing
        )));
    }

    let mut reverse = DirectedGraph::new(total_vertices);
    for (u, v) in graph.edges() {
        reverse.add_edge(v.as_usize(), u.as_usize()).map_err(|e| {
            AlgorithmError::VerificationFailed(format!("Cannot reverse edge {} -> {}: {}", u, v, e))
        })?;
    }

    for component in result.components.iter().filter(|c| c.size() > 1) {
        let forward = graph.reachable_from(component.root);
        let backward = reverse.reachable_from(component.root);
        let connected = component
            .vertices
            .iter()
            .all(|v| forward[v.as_usize()] && backward[v.as_usize()]);

        if !connected {
            warn!("Component {} failed the connectivity check", component.id);
            return Err(AlgorithmError::VerificationFailed(format!(
                "Component {} is not strongly connected",
                component.id
            )));
        }
    }

    for (from, to) in result.condensation(graph) {
        if from <= to {
            return Err(AlgorithmError::VerificationFailed(format!(
                "Condensation edge {} -> {} breaks reverse topological emission order",
                from, to
            )));
        }
    }

    Ok(())
}

impl Algorithm for StronglyConnectedComponents {
    type Input = EdgeList;
    type Output = SccDecomposition;

    fn name(&self) -> &'static str {
        "Strongly Connected Components (Tarjan)"
    }

    fn category(&self) -> &'static str {
        "graph"
    }

    fn description(&self) -> &'static str {
        "Tarjan's algorithm for finding strongly connected components in directed graphs with a single iterative depth-first search."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V + E)",
            space_complexity: "O(V)",
        }
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        let invalid = |reason: String| AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason,
        };
        match name {
            "verify_result" => self.config.verify_result = parse_bool_parameter(name, value)?,
            "self_loops" => self.config.self_loops = value.parse().map_err(invalid)?,
            "parallel_edges" => self.config.parallel_edges = value.parse().map_err(invalid)?,
            _ => return Err(unknown_parameter(name, PARAMETERS)),
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
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

    fn execute(&mut self, input: EdgeList) -> Result<SccDecomposition, AlgorithmError> {
        self.decompose(&input)
    }
}

impl fmt::Display for SccDecomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<Vec<usize>> = self
            .components
            .iter()
            .map(|c| c.vertices.iter().map(|v| v.as_usize()).collect())
            .collect();
        write!(f, "Strongly Connected Components: {:?}", components)
    }
}
