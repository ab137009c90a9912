//! Error types for u-hospital.
//!
//! Malformed individual fields are never errors; they resolve to defaults
//! during normalization. Errors cover structural input problems, engine
//! outputs that break their invariants, and the total-failure case.

use thiserror::Error;

use crate::models::{EngineKey, RequestStatus};
use crate::validation::ValidationError;

/// Failure of a single engine run.
///
/// The orchestrator logs these and drops the engine from the candidate pool.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("Unknown engine key: '{key}'")]
    UnknownEngine { key: String },

    #[error("Engine {engine} requires an object of parameters, got {found}")]
    MalformedParameters {
        engine: EngineKey,
        found: &'static str,
    },

    #[error("Engine {engine} produced an invalid summary ({count} violation(s))", count = .errors.len())]
    InvalidSummary {
        engine: EngineKey,
        errors: Vec<ValidationError>,
    },

    #[error("Engine {engine} panicked: {message}")]
    Panicked { engine: EngineKey, message: String },
}

/// Failure of the best-of-N selection step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No candidates to select from")]
    NoCandidates,
}

/// Failure reported by an external collaborator (storage, inventory).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// Terminal failure of an orchestrated run.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    #[error("No engine produced a result ({attempted} attempted)")]
    NoEngineProducedResult {
        attempted: usize,
        failures: Vec<EngineError>,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Request {request_id} cannot move from {from} to {to}")]
    InvalidTransition {
        request_id: String,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result alias for orchestration entry points.
pub type Result<T> = std::result::Result<T, OrchestrationError>;
