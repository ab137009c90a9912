//! Diagnostic payload carried alongside each summary.
//!
//! Details are for audit and debugging only. Selection never reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SimulationParameters;

/// Wait-time regime of the queueing engine, keyed by traffic intensity ρ.
///
/// | Regime | ρ range | Cap |
/// |--------|---------|-----|
/// | `Stable` | ρ < 0.95 | min(30, svc) |
/// | `NearSaturation` | 0.95 ≤ ρ < 1 | min(60, 2·svc) |
/// | `Overloaded` | ρ ≥ 1 | min(120, 3·svc), Erlang-C bypassed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitRegime {
    /// Erlang-C valid, capped at the service time (max 30 min).
    Stable,
    /// Erlang-C valid but steep, capped at twice the service time (max 60 min).
    NearSaturation,
    /// Erlang-C invalid; fixed pessimistic ceiling.
    Overloaded,
}

/// Intermediate quantities of the queueing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueingDiagnostics {
    /// Combined arrival rate (per minute).
    pub lambda: f64,
    /// Service rate per server (per minute).
    pub mu: f64,
    /// Parallel servers, `min(doctors, beds)`.
    pub servers: u32,
    pub duration_hours: f64,
    /// Uncapped traffic intensity λ/(cμ).
    pub load_factor: f64,
    /// Traffic intensity capped at 0.999 for the Wq formula.
    pub rho: f64,
    /// Erlang-C delay probability.
    pub erlang_c: f64,
    /// Erlang-C Wq before regime capping (`None` when overloaded).
    pub raw_wait_minutes: Option<f64>,
    /// Wq after regime capping.
    pub wait_minutes: f64,
    /// Time in system, Wq + 1/μ.
    pub time_in_system_minutes: f64,
    pub expected_arrivals: f64,
    pub max_throughput: f64,
    pub regime: WaitRegime,
}

/// Intermediate quantities of the priority bed allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedDiagnostics {
    pub duration_hours: f64,
    pub expected_arrivals: u64,
    pub expected_emergency_arrivals: u64,
    pub expected_clinic_arrivals: u64,
    pub avg_treatment_minutes_emergency: f64,
    pub avg_treatment_minutes_clinic: f64,
    /// Arrival-weighted mean treatment time.
    pub avg_treatment_minutes_weighted: f64,
    pub capacity_by_doctors: u64,
    pub capacity_by_beds: u64,
    pub throughput: u64,
    pub load_factor: f64,
    pub baseline_wait_minutes: f64,
    pub emergency_wait_minutes: f64,
    pub clinic_wait_minutes: f64,
    pub emergency_priority_boost: f64,
    /// Beds reserved for emergencies (echo only).
    pub emergency_beds: u32,
    /// Surgeons on shift (echo only).
    pub surgeons: u32,
    /// Operating rooms (echo only).
    pub operating_rooms: u32,
}

/// Intermediate quantities of the OR scheduling engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryDiagnostics {
    pub duration_hours: f64,
    /// Surgery arrival rate after per-day conversion.
    pub surgeries_per_hour: f64,
    pub expected_arrivals: u64,
    pub capacity_by_or: u64,
    pub capacity_by_surgeons: u64,
    /// OR-feasible surgeries before the recovery stage.
    pub doable: u64,
    pub recovery_capacity: u64,
    pub avg_surgery_minutes: f64,
    pub avg_recovery_minutes: f64,
    /// Arrivals over OR capacity.
    pub load_factor: f64,
    /// OR time used over OR time available, in `[0, 1]`.
    pub or_utilization: f64,
}

/// Engine-specific diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostics {
    Queueing(QueueingDiagnostics),
    Beds(BedDiagnostics),
    Surgery(SurgeryDiagnostics),
}

impl Diagnostics {
    /// Theoretical arrival count over the horizon.
    pub fn expected_arrivals(&self) -> f64 {
        match self {
            Diagnostics::Queueing(d) => d.expected_arrivals,
            Diagnostics::Beds(d) => d.expected_arrivals as f64,
            Diagnostics::Surgery(d) => d.expected_arrivals as f64,
        }
    }
}

/// Secondary payload of an engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDetails {
    /// When the engine was evaluated.
    pub evaluated_at: DateTime<Utc>,
    /// Parameters exactly as received.
    pub parameters: SimulationParameters,
    /// Engine-specific intermediates.
    pub diagnostics: Diagnostics,
}

impl EngineDetails {
    /// Stamps diagnostics with the current time and the input echo.
    pub fn new(parameters: SimulationParameters, diagnostics: Diagnostics) -> Self {
        Self {
            evaluated_at: Utc::now(),
            parameters,
            diagnostics,
        }
    }
}
