//! Hospital capacity domain models.
//!
//! Provides the data types exchanged between the caller, the engines and
//! the selection layer. Every value is created, computed and returned
//! within a single evaluation.
//!
//! # Domain Mappings
//!
//! | u-hospital | Clinic | Inpatient | Theatre |
//! |------------|--------|-----------|---------|
//! | Engine | Queueing (A) | Priority Beds (B) | OR Scheduling (C) |
//! | Servers | min(doctors, beds) | beds / doctors | rooms / surgeons |
//! | Arrivals | patients/hour | emergency + clinic | surgeries/hour or /day |

mod details;
mod parameters;
mod request;
mod summary;

pub use details::{
    BedDiagnostics, Diagnostics, EngineDetails, QueueingDiagnostics, SurgeryDiagnostics,
    WaitRegime,
};
pub use parameters::SimulationParameters;
pub use request::{RequestStatus, RequestType, SimulationRequest, UnknownRequestType};
pub use summary::{Candidate, EngineKey, EngineSummary, ResourceEcho};
