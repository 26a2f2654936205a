//! Graphwork core - classical graph theory engines for teaching
//!
//! Three independent, stateless engines, each taking an explicit input and
//! returning an explicit result with an execution trace:
//!
//! - [`HavelHakimi`] decides whether an integer sequence is the degree
//!   sequence of a simple graph
//! - [`StronglyConnectedComponents`] partitions a directed graph with
//!   Tarjan's single-pass algorithm
//! - [`MaxFlowSolver`] computes a maximum flow with Edmonds-Karp
//!
//! Rendering, node placement and demo input generation belong to callers.
//!
//! ```
//! use graphwork_core::api::{compute_max_flow, decompose_scc, validate_degree_sequence};
//!
//! assert!(validate_degree_sequence(vec![3, 3, 3, 3]).unwrap().valid);
//! assert_eq!(decompose_scc(3, &[(0, 1), (1, 0)]).unwrap().len(), 2);
//! assert_eq!(compute_max_flow(2, &[(0, 1, 5)], 0, 1).unwrap().total_flow, 5);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod api;
pub mod config;
pub mod data_structures;
pub mod execution;

pub use crate::algorithm::graph::{
    DegreeSequenceReport, HavelHakimi, MaxFlowResult, MaxFlowSolver, SccDecomposition,
    StronglyConnectedComponents,
};
pub use crate::algorithm::traits::{Algorithm, AlgorithmError, NodeId};
pub use crate::api::Toolkit;
pub use crate::config::ToolkitConfig;
