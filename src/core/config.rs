//! Configuration types for the triage pipeline.

use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;

/// Centralized configuration for parallel processing behavior.
///
/// The per-image work (decode, feature extraction, classification) is pure
/// and independent, so batches above the threshold fan out across a rayon
/// worker pool sized to the available CPU cores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of worker threads.
    /// If None, rayon uses its default pool size (number of CPU cores).
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Batches of at most this many images are processed sequentially.
    #[serde(default = "ParallelPolicy::default_batch_threshold")]
    pub batch_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the sequential batch threshold.
    pub fn with_batch_threshold(mut self, threshold: usize) -> Self {
        self.batch_threshold = threshold;
        self
    }

    fn default_batch_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            batch_threshold: Self::default_batch_threshold(),
        }
    }
}

/// Configuration for the triage engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Model identifier attached to every prediction.
    #[serde(default = "TriageConfig::default_model_name")]
    pub model_name: String,

    /// Parallel processing policy for batch runs.
    #[serde(default)]
    pub parallel_policy: ParallelPolicy,
}

impl TriageConfig {
    /// Create a new TriageConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Set the parallel processing policy.
    pub fn with_parallel_policy(mut self, policy: ParallelPolicy) -> Self {
        self.parallel_policy = policy;
        self
    }

    fn default_model_name() -> String {
        crate::core::constants::MODEL_NAME.to_string()
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            model_name: Self::default_model_name(),
            parallel_policy: ParallelPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_policy_defaults() {
        let policy = ParallelPolicy::default();
        assert_eq!(policy.max_threads, None);
        assert_eq!(policy.batch_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn config_builder_overrides() {
        let config = TriageConfig::new()
            .with_model_name("rust-heuristic-test")
            .with_parallel_policy(ParallelPolicy::new().with_batch_threshold(16));
        assert_eq!(config.model_name, "rust-heuristic-test");
        assert_eq!(config.parallel_policy.batch_threshold, 16);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: TriageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model_name, crate::core::constants::MODEL_NAME);
    }
}
