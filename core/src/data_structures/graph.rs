//! Directed graph representation with boundary validation
//!
//! Nodes are dense integers `0..N-1`. Adjacency lists are kept sorted so that
//! every traversal visits neighbors in ascending order, which makes traces
//! reproducible regardless of the order in which edges were supplied.
//!
//! All input checking happens here, before any algorithm runs: out-of-range
//! identifiers, self-loops, duplicate edges and negative capacities are
//! either rejected or normalized according to the caller's policy.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;

/// Malformed graph input, detected before execution begins
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },

    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("Duplicate edge {from} -> {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity { from: NodeId, to: NodeId, capacity: i64 },

    #[error("Merged capacity overflows on edge {from} -> {to}")]
    CapacityOverflow { from: NodeId, to: NodeId },
}

/// What to do with an edge `(u, u)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLoopPolicy {
    Reject,
    Ignore,
}

/// What to do with a second edge `(u, v)` when one already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelEdgePolicy {
    Reject,
    Ignore,
    /// Merge into one edge whose capacity is the sum; same as `Ignore` without capacities
    SumCapacities,
}

impl FromStr for SelfLoopPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(SelfLoopPolicy::Reject),
            "ignore" => Ok(SelfLoopPolicy::Ignore),
            other => Err(format!("unknown self-loop policy '{}', use 'reject' or 'ignore'", other)),
        }
    }
}

impl fmt::Display for SelfLoopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfLoopPolicy::Reject => write!(f, "reject"),
            SelfLoopPolicy::Ignore => write!(f, "ignore"),
        }
    }
}

impl FromStr for ParallelEdgePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(ParallelEdgePolicy::Reject),
            "ignore" => Ok(ParallelEdgePolicy::Ignore),
            "sum_capacities" => Ok(ParallelEdgePolicy::SumCapacities),
            other => Err(format!(
                "unknown parallel edge policy '{}', use 'reject', 'ignore' or 'sum_capacities'",
                other
            )),
        }
    }
}

impl fmt::Display for ParallelEdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParallelEdgePolicy::Reject => write!(f, "reject"),
            ParallelEdgePolicy::Ignore => write!(f, "ignore"),
            ParallelEdgePolicy::SumCapacities => write!(f, "sum_capacities"),
        }
    }
}

/// Uncapacitated graph input: node count plus directed edge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeList {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
}

impl EdgeList {
    pub fn new(node_count: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { node_count, edges }
    }
}

/// Edge with a signed capacity as supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitatedEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
}

impl CapacitatedEdge {
    pub fn new(from: usize, to: usize, capacity: i64) -> Self {
        Self { from, to, capacity }
    }
}

impl From<(usize, usize, i64)> for CapacitatedEdge {
    fn from((from, to, capacity): (usize, usize, i64)) -> Self {
        Self { from, to, capacity }
    }
}

/// Validated edge with a non-negative capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: u64,
}

fn check_node(node: usize, node_count: usize) -> Result<NodeId, GraphError> {
    if node < node_count {
        Ok(NodeId(node))
    } else {
        Err(GraphError::NodeOutOfRange { node, node_count })
    }
}

/// Validates a capacitated edge list and applies the self-loop and parallel edge policies
///
/// The returned edges keep the order of their first appearance.
pub fn validate_capacitated_edges(
    node_count: usize,
    edges: &[CapacitatedEdge],
    self_loops: SelfLoopPolicy,
    parallel_edges: ParallelEdgePolicy,
) -> Result<Vec<ValidatedEdge>, GraphError> {
    let mut validated: Vec<ValidatedEdge> = Vec::with_capacity(edges.len());
    let mut position: HashMap<(usize, usize), usize> = HashMap::with_capacity(edges.len());

    for edge in edges {
        let from = check_node(edge.from, node_count)?;
        let to = check_node(edge.to, node_count)?;

        if edge.capacity < 0 {
            return Err(GraphError::NegativeCapacity {
                from,
                to,
                capacity: edge.capacity,
            });
        }
        let capacity = edge.capacity as u64;

        if from == to {
            match self_loops {
                SelfLoopPolicy::Reject => return Err(GraphError::SelfLoop(from)),
                SelfLoopPolicy::Ignore => {
                    warn!("Ignoring self-loop on node {}", from);
                    continue;
                }
            }
        }

        match position.get(&(edge.from, edge.to)) {
            Some(&index) => match parallel_edges {
                ParallelEdgePolicy::Reject => return Err(GraphError::DuplicateEdge { from, to }),
                ParallelEdgePolicy::Ignore => {
                    warn!("Ignoring duplicate edge {} -> {}", from, to);
                }
                ParallelEdgePolicy::SumCapacities => {
                    let merged = validated[index]
                        .capacity
                        .checked_add(capacity)
                        .ok_or(GraphError::CapacityOverflow { from, to })?;
                    validated[index].capacity = merged;
                }
            },
            None => {
                position.insert((edge.from, edge.to), validated.len());
                validated.push(ValidatedEdge { from, to, capacity });
            }
        }
    }

    Ok(validated)
}

/// Directed graph over dense node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedGraph {
    node_count: usize,
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl DirectedGraph {
    /// Creates a graph with `node_count` isolated nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list, applying the given policies
    pub fn from_edges(
        node_count: usize,
        edges: &[(usize, usize)],
        self_loops: SelfLoopPolicy,
        parallel_edges: ParallelEdgePolicy,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(node_count);
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(edges.len());

        for &(u, v) in edges {
            let from = check_node(u, node_count)?;
            let to = check_node(v, node_count)?;

            if from == to {
                match self_loops {
                    SelfLoopPolicy::Reject => return Err(GraphError::SelfLoop(from)),
                    SelfLoopPolicy::Ignore => {
                        warn!("Ignoring self-loop on node {}", from);
                        continue;
                    }
                }
            }

            if !seen.insert((u, v)) {
                match parallel_edges {
                    ParallelEdgePolicy::Reject => return Err(GraphError::DuplicateEdge { from, to }),
                    ParallelEdgePolicy::Ignore | ParallelEdgePolicy::SumCapacities => {
                        warn!("Ignoring duplicate edge {} -> {}", from, to);
                        continue;
                    }
                }
            }

            graph.adjacency[u].push(to);
            graph.edge_count += 1;
        }

        for neighbors in &mut graph.adjacency {
            neighbors.sort_unstable();
        }

        Ok(graph)
    }

    /// Adds a single edge, rejecting self-loops and duplicates
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError> {
        let from_id = check_node(from, self.node_count)?;
        let to_id = check_node(to, self.node_count)?;
        if from == to {
            return Err(GraphError::SelfLoop(from_id));
        }

        let neighbors = &mut self.adjacency[from];
        match neighbors.binary_search(&to_id) {
            Ok(_) => Err(GraphError::DuplicateEdge { from: from_id, to: to_id }),
            Err(slot) => {
                neighbors.insert(slot, to_id);
                self.edge_count += 1;
                Ok(())
            }
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.node_count).map(NodeId)
    }

    /// Successors of `node` in ascending order; empty for unknown nodes
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.as_usize())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| neighbors.iter().map(move |&v| (NodeId(u), v)))
    }

    /// Nodes reachable from `start` following edge direction, as a membership mask
    pub fn reachable_from(&self, start: NodeId) -> Vec<bool> {
        let mut visited = vec![false; self.node_count];
        if start.as_usize() >= self.node_count {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[start.as_usize()] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if !visited[next.as_usize()] {
                    visited[next.as_usize()] = true;
                    queue.push_back(next);
                }
            }
        }

        visited
    }
}
