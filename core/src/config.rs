//! Toolkit configuration
//!
//! One serde document configures all three engines. Every section is
//! optional; missing fields fall back to their defaults.
//!
//! ```json
//! {
//!   "degree_sequence": { "record_trace": true, "verify_result": true },
//!   "scc": { "self_loops": "ignore" },
//!   "max_flow": { "parallel_edges": "reject" },
//!   "batch": { "deadline_ms": 250 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::graph::{ParallelEdgePolicy, SelfLoopPolicy};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Havel-Hakimi settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegreeSequenceConfig {
    /// Keep one snapshot per reduction step
    pub record_trace: bool,
    /// Cross-check every verdict against the Erdős–Gallai inequalities
    pub verify_result: bool,
}

impl Default for DegreeSequenceConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            verify_result: false,
        }
    }
}

/// Tarjan settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SccConfig {
    pub verify_result: bool,
    pub self_loops: SelfLoopPolicy,
    pub parallel_edges: ParallelEdgePolicy,
}

impl Default for SccConfig {
    fn default() -> Self {
        Self {
            verify_result: false,
            self_loops: SelfLoopPolicy::Ignore,
            parallel_edges: ParallelEdgePolicy::Ignore,
        }
    }
}

/// Edmonds-Karp settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxFlowConfig {
    /// Keep every augmenting path with its edge snapshots
    pub record_trace: bool,
    pub verify_result: bool,
    pub self_loops: SelfLoopPolicy,
    pub parallel_edges: ParallelEdgePolicy,
}

impl Default for MaxFlowConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            verify_result: false,
            self_loops: SelfLoopPolicy::Reject,
            parallel_edges: ParallelEdgePolicy::SumCapacities,
        }
    }
}

/// Settings for batch and supervised execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Wall-clock limit for a supervised invocation, in milliseconds
    pub deadline_ms: Option<u64>,
}

impl BatchConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

/// Complete toolkit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub degree_sequence: DegreeSequenceConfig,
    pub scc: SccConfig,
    pub max_flow: MaxFlowConfig,
    pub batch: BatchConfig,
}

impl ToolkitConfig {
    /// Parses and validates a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ToolkitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.deadline_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "batch.deadline_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
