//! Batch and supervised execution
//!
//! The engines are synchronous and share no state, so independent inputs can
//! run in parallel as long as each invocation owns its input. Batches fan out
//! over rayon's pool and keep input order in their output.
//!
//! The engines have no internal cancellation. `run_with_deadline` moves one
//! invocation onto tokio's blocking pool and stops waiting once the deadline
//! passes; the abandoned invocation finishes in the background and its
//! result is dropped.

use std::time::Duration;

use log::{debug, warn};
use rayon::prelude::*;

use crate::algorithm::graph::degree_sequence::{DegreeSequenceReport, HavelHakimi};
use crate::algorithm::graph::max_flow::{FlowInput, MaxFlowResult, MaxFlowSolver};
use crate::algorithm::graph::scc::{SccDecomposition, StronglyConnectedComponents};
use crate::algorithm::traits::AlgorithmError;
use crate::config::ToolkitConfig;
use crate::data_structures::graph::EdgeList;

/// Runs `job` on the blocking pool, giving up after `deadline`
pub async fn run_with_deadline<T, F>(deadline: Duration, job: F) -> Result<T, AlgorithmError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AlgorithmError> + Send + 'static,
{
    match tokio::time::timeout(deadline, tokio::task::spawn_blocking(job)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AlgorithmError::ExecutionError(format!(
            "Supervised task failed: {}",
            join_error
        ))),
        Err(_) => {
            warn!("Supervised task exceeded its deadline of {:?}", deadline);
            Err(AlgorithmError::DeadlineExceeded(deadline))
        }
    }
}

/// Parallel executor configured once for all three engines
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    config: ToolkitConfig,
}

impl BatchExecutor {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Validates every sequence in parallel; results keep input order
    pub fn validate_batch(
        &self,
        sequences: Vec<Vec<i64>>,
    ) -> Vec<Result<DegreeSequenceReport, AlgorithmError>> {
        debug!("Validating {} degree sequences in parallel", sequences.len());
        let validator = HavelHakimi::with_config(self.config.degree_sequence.clone());
        sequences
            .into_par_iter()
            .map(|sequence| validator.validate(sequence))
            .collect()
    }

    /// Decomposes every graph in parallel; results keep input order
    pub fn decompose_batch(&self, inputs: Vec<EdgeList>) -> Vec<Result<SccDecomposition, AlgorithmError>> {
        debug!("Decomposing {} graphs in parallel", inputs.len());
        let decomposer = StronglyConnectedComponents::with_config(self.config.scc.clone());
        inputs
            .into_par_iter()
            .map(|input| decomposer.decompose(&input))
            .collect()
    }

    /// Solves every flow problem in parallel; results keep input order
    pub fn max_flow_batch(&self, inputs: Vec<FlowInput>) -> Vec<Result<MaxFlowResult, AlgorithmError>> {
        debug!("Solving {} flow networks in parallel", inputs.len());
        let solver = MaxFlowSolver::with_config(self.config.max_flow.clone());
        inputs
            .into_par_iter()
            .map(|input| solver.compute(&input))
            .collect()
    }

    /// Runs `job` under the configured deadline, or to completion when none is set
    pub async fn supervise<T, F>(&self, job: F) -> Result<T, AlgorithmError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, AlgorithmError> + Send + 'static,
    {
        match self.config.batch.deadline() {
            Some(deadline) => run_with_deadline(deadline, job).await,
            None => tokio::task::spawn_blocking(job).await.map_err(|join_error| {
                AlgorithmError::ExecutionError(format!("Supervised task failed: {}", join_error))
            })?,
        }
    }

    pub async fn supervised_max_flow(&self, input: FlowInput) -> Result<MaxFlowResult, AlgorithmError> {
        let solver = MaxFlowSolver::with_config(self.config.max_flow.clone());
        self.supervise(move || solver.compute(&input)).await
    }

    pub async fn supervised_scc(&self, input: EdgeList) -> Result<SccDecomposition, AlgorithmError> {
        let decomposer = StronglyConnectedComponents::with_config(self.config.scc.clone());
        self.supervise(move || decomposer.decompose(&input)).await
    }

    pub async fn supervised_validation(
        &self,
        sequence: Vec<i64>,
    ) -> Result<DegreeSequenceReport, AlgorithmError> {
        let validator = HavelHakimi::with_config(self.config.degree_sequence.clone());
        self.supervise(move || validator.validate(sequence)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::CapacitatedEdge;

    #[test]
    fn test_validate_batch_keeps_order() {
        let executor = BatchExecutor::default();
        let verdicts: Vec<bool> = executor
            .validate_batch(vec![vec![3, 3, 3, 3], vec![4, 4, 1, 1], vec![1, 1], vec![1]])
            .into_iter()
            .map(|report| report.unwrap().valid)
            .collect();
        assert_eq!(verdicts, vec![true, false, true, false]);
    }

    #[test]
    fn test_batches_report_errors_per_input() {
        let executor = BatchExecutor::default();
        let results = executor.max_flow_batch(vec![
            FlowInput::new(2, vec![CapacitatedEdge::new(0, 1, 4)], 0, 1),
            FlowInput::new(2, vec![CapacitatedEdge::new(0, 1, 4)], 0, 0),
        ]);
        assert_eq!(results[0].as_ref().map(|r| r.total_flow).ok(), Some(4));
        assert!(matches!(results[1], Err(AlgorithmError::SourceIsSink(_))));

        let components = executor.decompose_batch(vec![
            EdgeList::new(3, vec![(0, 1), (1, 0)]),
            EdgeList::new(1, vec![(0, 3)]),
        ]);
        assert_eq!(components[0].as_ref().map(|r| r.num_components()).ok(), Some(2));
        assert!(components[1].is_err());
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let result = run_with_deadline(Duration::from_millis(10), || {
            std::thread::sleep(Duration::from_millis(200));
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(AlgorithmError::DeadlineExceeded(_))));
    }

    #[tokio::test]
    async fn test_supervised_runs_complete() {
        let mut config = ToolkitConfig::default();
        config.batch.deadline_ms = Some(5_000);
        let executor = BatchExecutor::new(config);

        let flow = executor
            .supervised_max_flow(FlowInput::new(
                4,
                vec![
                    CapacitatedEdge::new(0, 1, 3),
                    CapacitatedEdge::new(0, 2, 2),
                    CapacitatedEdge::new(1, 3, 2),
                    CapacitatedEdge::new(2, 3, 3),
                ],
                0,
                3,
            ))
            .await
            .unwrap();
        assert_eq!(flow.total_flow, 4);

        let scc = executor
            .supervised_scc(EdgeList::new(2, vec![(0, 1), (1, 0)]))
            .await
            .unwrap();
        assert!(scc.is_strongly_connected());

        let report = BatchExecutor::default()
            .supervised_validation(vec![2, 2, 2])
            .await
            .unwrap();
        assert!(report.valid);
    }
}
