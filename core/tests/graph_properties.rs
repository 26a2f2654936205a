//! Property tests for the three engines

use std::collections::BTreeSet;

use graphwork_core::algorithm::graph::degree_sequence::{satisfies_erdos_gallai, HavelHakimi};
use graphwork_core::algorithm::graph::max_flow::{verify_flow, FlowInput, MaxFlowSolver};
use graphwork_core::algorithm::graph::scc::{verify_scc_result, StronglyConnectedComponents};
use graphwork_core::data_structures::graph::{CapacitatedEdge, EdgeList};
use graphwork_core::NodeId;
use proptest::prelude::*;

fn degree_sequence() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..8, 0..12)
}

fn directed_graph() -> impl Strategy<Value = EdgeList> {
    (1usize..20).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..60).prop_map(move |edges| EdgeList::new(n, edges))
    })
}

fn flow_input() -> impl Strategy<Value = FlowInput> {
    (2usize..10).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n, 0i64..20), 0..40).prop_map(|edges| {
            edges
                .into_iter()
                .filter(|(from, to, _)| from != to)
                .map(CapacitatedEdge::from)
                .collect::<Vec<_>>()
        });
        (edges, 1..n).prop_map(move |(edges, sink)| FlowInput::new(n, edges, 0, sink))
    })
}

proptest! {
    #[test]
    fn odd_degree_sum_is_never_graphical(mut sequence in prop::collection::vec(0i64..8, 1..12)) {
        if sequence.iter().sum::<i64>() % 2 == 0 {
            sequence[0] += 1;
        }
        let report = HavelHakimi::new().validate(sequence).unwrap();
        prop_assert!(!report.valid);
    }

    #[test]
    fn havel_hakimi_agrees_with_erdos_gallai(sequence in degree_sequence()) {
        let report = HavelHakimi::new().validate(sequence.clone()).unwrap();
        prop_assert_eq!(report.valid, satisfies_erdos_gallai(&sequence));
        prop_assert!(report.trace.iter().enumerate().all(|(i, step)| step.step_index == i + 1));
    }

    #[test]
    fn components_partition_the_graph(input in directed_graph()) {
        let engine = StronglyConnectedComponents::new();
        let graph = engine.build_graph(&input).unwrap();
        let result = engine.compute_scc(&graph).unwrap();

        verify_scc_result(&graph, &result).unwrap();

        let covered: BTreeSet<usize> = result.node_sets().into_iter().flatten().collect();
        prop_assert_eq!(covered.len(), input.node_count);
        for (from, to) in result.condensation(&graph) {
            prop_assert!(from > to);
        }
    }

    #[test]
    fn max_flow_equals_min_cut(input in flow_input()) {
        let solver = MaxFlowSolver::new();
        let mut network = solver.build_network(&input).unwrap();
        let result = solver
            .solve(&mut network, NodeId(input.source), NodeId(input.sink))
            .unwrap();

        prop_assert_eq!(u128::from(result.total_flow), result.min_cut.capacity);
        prop_assert_eq!(result.paths.iter().map(|p| p.bottleneck).sum::<u64>(), result.total_flow);
        verify_flow(&network, NodeId(input.source), NodeId(input.sink), &result).unwrap();
    }

    #[test]
    fn engines_are_deterministic(graph in directed_graph(), flow in flow_input()) {
        let engine = StronglyConnectedComponents::new();
        prop_assert_eq!(
            engine.decompose(&graph).unwrap().node_sets(),
            engine.decompose(&graph).unwrap().node_sets()
        );

        let solver = MaxFlowSolver::new();
        let first = solver.compute(&flow).unwrap();
        let second = solver.compute(&flow).unwrap();
        prop_assert_eq!(first.total_flow, second.total_flow);
        prop_assert_eq!(first.paths, second.paths);
    }
}
