//! Engine plan resolution.

use serde::Serialize;
use tracing::info;

use crate::engines::EngineRegistry;
use crate::models::SimulationRequest;

/// Where the engine list of a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanSource {
    /// The request named an engine.
    Explicit,
    /// The request type mapped to an engine.
    RequestType,
    /// Nothing narrowed the plan; every registered engine runs.
    All,
}

/// Ordered list of engine keys to run.
///
/// Keys stay raw strings so that an unknown explicit key fails only its
/// own engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnginePlan {
    pub keys: Vec<String>,
    pub source: PlanSource,
}

impl EnginePlan {
    /// Every registered engine in registration order.
    pub fn all(registry: &EngineRegistry) -> Self {
        Self {
            keys: registry.keys().iter().map(|k| k.to_string()).collect(),
            source: PlanSource::All,
        }
    }

    /// A single named engine.
    pub fn explicit(key: impl Into<String>) -> Self {
        Self {
            keys: vec![key.into()],
            source: PlanSource::Explicit,
        }
    }

    /// Resolves the plan for a request.
    ///
    /// Explicit engine > request type mapping > all engines. Blank engine
    /// names and unrecognised request types do not narrow the plan.
    pub fn resolve(request: &SimulationRequest, registry: &EngineRegistry) -> Self {
        let explicit = request
            .engine
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        let plan = if let Some(engine) = explicit {
            Self::explicit(engine)
        } else if let Some(request_type) = request.parsed_type() {
            Self {
                keys: vec![request_type.engine().to_string()],
                source: PlanSource::RequestType,
            }
        } else {
            Self::all(registry)
        };

        info!(
            request_id = %request.id,
            source = ?plan.source,
            engines = ?plan.keys,
            "engine plan resolved"
        );
        plan
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
