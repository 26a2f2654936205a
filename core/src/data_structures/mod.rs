//! Graph representations shared by the algorithm engines

pub mod graph;

pub use self::graph::{
    CapacitatedEdge, DirectedGraph, EdgeList, GraphError, ParallelEdgePolicy, SelfLoopPolicy,
    ValidatedEdge,
};
