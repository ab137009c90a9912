//! Engine runs and best-of-N selection.
//!
//! Each engine run is isolated: a failing engine is logged and dropped
//! from the candidate pool while its siblings continue. A panicking engine
//! counts as failing. The run fails as a whole only when no candidate
//! remains.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{error, info, warn};

use super::EnginePlan;
use crate::engines::EngineRegistry;
use crate::error::{EngineError, OrchestrationError, Result};
use crate::models::{Candidate, SimulationParameters};
use crate::selection::{SelectionPolicy, SelectionResult};

type Outcome = std::result::Result<Candidate, EngineError>;

/// Runs engine plans and selects the best candidate.
///
/// # Example
/// ```
/// use u_hospital::models::{EngineKey, SimulationParameters};
/// use u_hospital::orchestrator::Orchestrator;
///
/// let params = SimulationParameters::new()
///     .with("clinicPatientsPerHour", 6)
///     .with("doctors", 3)
///     .with("beds", 10);
///
/// let result = Orchestrator::new()
///     .run_engines(&["engineA", "engineB", "engineC"], &params)
///     .unwrap();
/// assert_eq!(result.all_results.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    registry: EngineRegistry,
    policy: SelectionPolicy,
    parallel: bool,
    num_threads: Option<usize>,
}

impl Orchestrator {
    /// Standard registry, standard policy, sequential runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine registry.
    pub fn with_registry(mut self, registry: EngineRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the selection policy.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs plans on a thread pool instead of the calling thread.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sizes the thread pool used by parallel runs and enables them.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads.max(1));
        self.parallel = true;
        self
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Runs a resolved plan, in parallel if configured.
    pub fn run_plan(
        &self,
        plan: &EnginePlan,
        params: &SimulationParameters,
    ) -> Result<SelectionResult> {
        if self.parallel {
            self.run_engines_parallel(&plan.keys, params)
        } else {
            self.run_engines(&plan.keys, params)
        }
    }

    /// Runs the named engines one after another and selects the best.
    ///
    /// # Errors
    /// [`OrchestrationError::NoEngineProducedResult`] when every engine
    /// failed or `keys` is empty.
    pub fn run_engines<S: AsRef<str>>(
        &self,
        keys: &[S],
        params: &SimulationParameters,
    ) -> Result<SelectionResult> {
        let outcomes: Vec<Outcome> = keys
            .iter()
            .map(|key| self.evaluate_one(key.as_ref(), params))
            .collect();
        self.select(outcomes)
    }

    /// Runs the named engines on a rayon pool and selects the best.
    ///
    /// Candidates are reassembled in plan order, so the outcome matches
    /// [`run_engines`](Self::run_engines).
    ///
    /// # Errors
    /// - [`OrchestrationError::ThreadPool`] if the pool cannot be built
    /// - [`OrchestrationError::NoEngineProducedResult`] as for `run_engines`
    pub fn run_engines_parallel<S: AsRef<str> + Sync>(
        &self,
        keys: &[S],
        params: &SimulationParameters,
    ) -> Result<SelectionResult> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.num_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| OrchestrationError::ThreadPool(e.to_string()))?;

        let outcomes: Vec<Outcome> = pool.install(|| {
            keys.par_iter()
                .map(|key| self.evaluate_one(key.as_ref(), params))
                .collect()
        });
        self.select(outcomes)
    }

    /// Evaluates candidates without selecting, returning per-key outcomes
    /// in plan order.
    pub fn evaluate_all<S: AsRef<str>>(
        &self,
        keys: &[S],
        params: &SimulationParameters,
    ) -> Vec<Outcome> {
        keys.iter()
            .map(|key| self.evaluate_one(key.as_ref(), params))
            .collect()
    }

    fn evaluate_one(&self, key: &str, params: &SimulationParameters) -> Outcome {
        let outcome = self.registry.resolve(key).and_then(|engine| {
            // Engines only read `params`, so nothing is left half-updated.
            panic::catch_unwind(AssertUnwindSafe(|| engine.evaluate(params))).unwrap_or_else(
                |payload| {
                    Err(EngineError::Panicked {
                        engine: engine.key(),
                        message: panic_message(payload.as_ref()),
                    })
                },
            )
        });
        if let Err(e) = &outcome {
            warn!(engine = key, error = %e, "engine excluded from selection");
        }
        outcome
    }

    fn select(&self, outcomes: Vec<Outcome>) -> Result<SelectionResult> {
        let attempted = outcomes.len();
        let mut candidates = Vec::with_capacity(attempted);
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => failures.push(e),
            }
        }

        if candidates.is_empty() {
            error!(attempted, "no engine produced a result");
            return Err(OrchestrationError::NoEngineProducedResult {
                attempted,
                failures,
            });
        }

        let result = self.policy.select_best(candidates)?;
        info!(
            best = %result.best_engine_key,
            avg_wait_minutes = result.summary.avg_wait_minutes,
            utilization_pct = result.summary.overall_utilization_pct,
            attempted,
            excluded = failures.len(),
            "best engine selected"
        );
        Ok(result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
