use serde::{Deserialize, Serialize};

use super::Orchestrator;
use crate::selection::{SelectionPolicy, DEFAULT_EPSILON};

/// Serializable orchestrator settings.
///
/// ```
/// use u_hospital::orchestrator::OrchestratorConfig;
///
/// let config: OrchestratorConfig =
///     serde_json::from_str(r#"{ "parallel": true, "numThreads": 3 }"#).unwrap();
/// assert!(config.build().is_parallel());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorConfig {
    /// Run engines on a rayon pool.
    pub parallel: bool,
    /// Pool size; rayon's default when absent.
    pub num_threads: Option<usize>,
    /// Tolerance when comparing ranking scores, clamped to at most
    /// [`MAX_EPSILON`](crate::selection::MAX_EPSILON) when built.
    pub epsilon: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            num_threads: None,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl OrchestratorConfig {
    /// Builds an orchestrator with the standard registry and policy.
    pub fn build(&self) -> Orchestrator {
        let orchestrator = Orchestrator::new()
            .with_policy(SelectionPolicy::standard().with_epsilon(self.epsilon))
            .with_parallel(self.parallel);
        match self.num_threads {
            Some(threads) if self.parallel => orchestrator.with_threads(threads),
            _ => orchestrator,
        }
    }
}
