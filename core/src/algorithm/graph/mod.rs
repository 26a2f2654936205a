//! Classical graph theory algorithms with execution traces
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod degree_sequence;
pub mod max_flow;
pub mod scc;

pub use self::degree_sequence::{
    degree_sequence_of, satisfies_erdos_gallai, DegreeSequenceReport, HavelHakimi, ReductionAction,
    ReductionStep,
};
pub use self::max_flow::{
    AugmentingPath, EdgeFlow, EdgeSnapshot, FlowEdge, FlowInput, FlowNetwork, MaxFlowResult,
    MaxFlowSolver, MinCut,
};
pub use self::scc::{SccDecomposition, StronglyConnectedComponent, StronglyConnectedComponents};
