//! Orchestration: plan resolution, engine runs, selection and request
//! processing.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`EnginePlan`] | explicit engine > request type > all engines |
//! | [`Orchestrator`] | isolated engine runs (sequential or rayon) + selection |
//! | [`OrchestratorConfig`] | serde settings that build an orchestrator |
//! | [`RequestProcessor`] | status lifecycle, persistence and inventory calls |
//!
//! # Failure Model
//!
//! A failing or panicking engine is logged and excluded. A run fails only when no
//! candidate remains ([`OrchestrationError::NoEngineProducedResult`]).
//!
//! [`OrchestrationError::NoEngineProducedResult`]: crate::error::OrchestrationError::NoEngineProducedResult

mod config;
mod plan;
mod processor;
mod runner;

pub use config::OrchestratorConfig;
pub use plan::{EnginePlan, PlanSource};
pub use processor::{InventoryHook, NoInventory, RequestProcessor, ResultSink};
pub use runner::Orchestrator;

use crate::error::Result;
use crate::models::SimulationParameters;
use crate::selection::SelectionResult;

/// Runs the named engines with the default orchestrator.
///
/// # Errors
/// [`OrchestrationError::NoEngineProducedResult`](crate::error::OrchestrationError::NoEngineProducedResult)
/// when no engine produced a result.
pub fn run_engines<S: AsRef<str>>(
    keys: &[S],
    params: &SimulationParameters,
) -> Result<SelectionResult> {
    Orchestrator::new().run_engines(keys, params)
}
