//! Analytical hospital capacity engines with best-of-N selection.
//!
//! Three closed-form models estimate patient wait, throughput and resource
//! utilization for a loosely-typed parameter record. Their summaries are
//! comparable, so the orchestrator can run several and pick the
//! configuration with the lowest wait.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SimulationParameters`, `EngineSummary`,
//!   `Candidate`, `SimulationRequest`, `RequestStatus`
//! - **`normalize`**: Alias chains, defaults, floors and unit heuristics
//! - **`engines`**: Erlang-C queueing (A), priority beds (B), OR scheduling (C)
//! - **`selection`**: Composable ranking criteria and the selection policy
//! - **`orchestrator`**: Plan resolution, isolated engine runs, request lifecycle
//! - **`validation`**: Summary invariant checks
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_hospital::models::SimulationParameters;
//! use u_hospital::orchestrator::run_engines;
//!
//! let params = SimulationParameters::new()
//!     .with("clinicPatientsPerHour", 6)
//!     .with("avgServiceMinutes", 15)
//!     .with("doctors", 3)
//!     .with("beds", 10)
//!     .with("durationHours", 4);
//!
//! let result = run_engines(&["engineA", "engineB", "engineC"], &params).unwrap();
//! assert!(result.summary.avg_wait_minutes >= 0.0);
//! assert_eq!(result.all_results[0].key, result.best_engine_key);
//! ```
//!
//! # References
//!
//! - Gross et al. (2008), "Fundamentals of Queueing Theory", Ch. 2 (M/M/c)
//! - Kleinrock (1975), "Queueing Systems, Volume 1: Theory"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod engines;
pub mod error;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod selection;
pub mod validation;

pub use engines::{evaluate, AnalyticalEngine, EngineRegistry};
pub use error::{EngineError, OrchestrationError, SelectionError};
pub use normalize::normalize;
pub use orchestrator::{run_engines, Orchestrator, RequestProcessor};
pub use selection::{select_best, SelectionResult};
