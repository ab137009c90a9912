//! Analytical engines and the engine registry.
//!
//! Each engine turns a parameter record into a bounded [`EngineSummary`]
//! plus diagnostics. Engines are pure: no I/O, no shared state, the same
//! input always yields the same summary.
//!
//! # Engines
//!
//! | Key | Engine | Model |
//! |-----|--------|-------|
//! | `engineA` | [`QueueingEngine`] | Erlang-C M/M/c approximation |
//! | `engineB` | [`PriorityBedEngine`] | two-class priority bed pool |
//! | `engineC` | [`OrSchedulingEngine`] | OR → recovery pipeline |
//!
//! # Usage
//!
//! ```
//! use u_hospital::engines::{evaluate, EngineRegistry};
//! use u_hospital::models::{EngineKey, SimulationParameters};
//!
//! let params = SimulationParameters::new()
//!     .with("clinicPatientsPerHour", 6)
//!     .with("avgServiceMinutes", 15)
//!     .with("doctors", 3)
//!     .with("beds", 10)
//!     .with("durationHours", 4);
//!
//! let candidate = evaluate(EngineKey::Queueing, &params).unwrap();
//! assert_eq!(candidate.summary.overall_utilization_pct, 50);
//!
//! let registry = EngineRegistry::standard();
//! assert_eq!(registry.list().len(), 3);
//! ```

mod bed;
pub(crate) mod kpi;
mod queueing;
mod surgery;

pub use bed::PriorityBedEngine;
pub use queueing::{erlang_c, QueueingEngine};
pub use surgery::OrSchedulingEngine;

use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

use crate::error::EngineError;
use crate::models::{
    Candidate, Diagnostics, EngineDetails, EngineKey, EngineSummary, SimulationParameters,
};
use crate::validation::validate_with_diagnostics;

/// Raw output of an engine before validation and stamping.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub summary: EngineSummary,
    pub diagnostics: Diagnostics,
}

/// An analytical capacity model.
///
/// Implementors provide [`estimate`](AnalyticalEngine::estimate); the
/// provided [`evaluate`](AnalyticalEngine::evaluate) adds the structural
/// input check, output validation and the diagnostic envelope.
pub trait AnalyticalEngine: Send + Sync + Debug {
    /// Engine identifier.
    fn key(&self) -> EngineKey;

    /// Computes the summary and diagnostics.
    ///
    /// Must be total over any parameter record.
    fn estimate(&self, params: &SimulationParameters) -> Estimate;

    /// Engine name.
    fn name(&self) -> &'static str {
        self.key().display_name()
    }

    /// Engine description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Runs the engine and returns a validated candidate.
    ///
    /// # Errors
    /// - [`EngineError::MalformedParameters`] if the document is not an object
    /// - [`EngineError::InvalidSummary`] if the summary breaks an invariant
    fn evaluate(&self, params: &SimulationParameters) -> Result<Candidate, EngineError> {
        let key = self.key();
        if !params.is_object() {
            return Err(EngineError::MalformedParameters {
                engine: key,
                found: params.kind(),
            });
        }

        let Estimate {
            summary,
            diagnostics,
        } = self.estimate(params);

        validate_with_diagnostics(key, &summary, &diagnostics)
            .map_err(|errors| EngineError::InvalidSummary { engine: key, errors })?;

        debug!(
            engine = %key,
            avg_wait_minutes = summary.avg_wait_minutes,
            patients_served = summary.patients_served,
            utilization_pct = summary.overall_utilization_pct,
            "engine evaluated"
        );

        Ok(Candidate {
            key,
            summary,
            details: EngineDetails::new(params.clone(), diagnostics),
        })
    }
}

/// Key and display name of a registered engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineDescriptor {
    pub key: EngineKey,
    pub name: &'static str,
}

/// Stateless key → engine table.
///
/// Registration order is evaluation order when every engine runs.
#[derive(Clone)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn AnalyticalEngine>>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Registry with the three built-in engines in A, B, C order.
    pub fn standard() -> Self {
        Self::new()
            .with_engine(QueueingEngine)
            .with_engine(PriorityBedEngine)
            .with_engine(OrSchedulingEngine)
    }

    /// Registers an engine, replacing any engine with the same key in place.
    pub fn with_engine<E: AnalyticalEngine + 'static>(mut self, engine: E) -> Self {
        let engine: Arc<dyn AnalyticalEngine> = Arc::new(engine);
        match self.engines.iter().position(|e| e.key() == engine.key()) {
            Some(idx) => self.engines[idx] = engine,
            None => self.engines.push(engine),
        }
        self
    }

    /// Looks up an engine by key.
    pub fn get(&self, key: EngineKey) -> Option<&dyn AnalyticalEngine> {
        self.engines
            .iter()
            .find(|e| e.key() == key)
            .map(|e| e.as_ref())
    }

    /// Looks up an engine by wire name.
    pub fn resolve(&self, key: &str) -> Result<&dyn AnalyticalEngine, EngineError> {
        let parsed: EngineKey = key.parse()?;
        self.get(parsed).ok_or_else(|| EngineError::UnknownEngine {
            key: key.to_string(),
        })
    }

    /// Registered engine keys in evaluation order.
    pub fn keys(&self) -> Vec<EngineKey> {
        self.engines.iter().map(|e| e.key()).collect()
    }

    /// Registered engines as descriptors.
    pub fn list(&self) -> Vec<EngineDescriptor> {
        self.engines
            .iter()
            .map(|e| EngineDescriptor {
                key: e.key(),
                name: e.name(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field(
                "engines",
                &self
                    .engines
                    .iter()
                    .map(|e| format!("{}({})", e.key(), e.name()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Evaluates one of the built-in engines.
pub fn evaluate(key: EngineKey, params: &SimulationParameters) -> Result<Candidate, EngineError> {
    match key {
        EngineKey::Queueing => QueueingEngine.evaluate(params),
        EngineKey::PriorityBeds => PriorityBedEngine.evaluate(params),
        EngineKey::OrScheduling => OrSchedulingEngine.evaluate(params),
    }
}
