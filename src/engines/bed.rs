//! Engine B: priority bed allocator.
//!
//! Emergency and clinic patients share one bed pool. Capacity is limited
//! by whichever of doctors or beds runs out first; when demand exceeds the
//! larger of the two capacities a baseline wait builds up, and emergencies
//! see that wait divided by a priority boost.
//!
//! # Algorithm
//!
//! 1. Expected arrivals per class over the horizon.
//! 2. Arrival-weighted mean treatment time.
//! 3. `capacityBy{Doctors,Beds} = floor(count × minutes / weightedTreatment)`.
//! 4. Throughput = min(arrivals, both capacities).
//! 5. Load = arrivals / max(capacities); wait = weighted × (load − 1) / 2 above 1.
//! 6. Emergency wait = wait / boost, clinic wait = wait; report the
//!    arrival-weighted mean.

use tracing::debug;

use super::kpi::{
    finite_non_negative, round_tenths, saturate, to_count, to_units, utilization_pct,
};
use super::{AnalyticalEngine, Estimate};
use crate::models::{
    BedDiagnostics, Diagnostics, EngineKey, EngineSummary, ResourceEcho, SimulationParameters,
};
use crate::normalize::BedParams;

/// Share of the excess load that turns into waiting time.
const OVERLOAD_WAIT_FACTOR: f64 = 0.5;

/// Engine B: two-class priority bed pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityBedEngine;

impl AnalyticalEngine for PriorityBedEngine {
    fn key(&self) -> EngineKey {
        EngineKey::PriorityBeds
    }

    fn description(&self) -> &'static str {
        "Two-class bed pool with emergency priority weighting"
    }

    fn estimate(&self, params: &SimulationParameters) -> Estimate {
        let p = BedParams::from_parameters(params);
        let total_minutes = p.duration_hours * 60.0;

        let emergency_arrivals = to_count((p.emergency_per_hour / 60.0 * total_minutes).round());
        let clinic_arrivals = to_count((p.clinic_per_hour / 60.0 * total_minutes).round());
        let arrivals = emergency_arrivals.saturating_add(clinic_arrivals);

        let te = p.treatment_minutes_emergency;
        let tc = p.treatment_minutes_clinic;
        let weighted_treatment = if arrivals > 0 {
            (te * emergency_arrivals as f64 + tc * clinic_arrivals as f64) / arrivals as f64
        } else {
            (te + tc) / 2.0
        };

        let capacity_by_doctors = to_count((p.doctors * total_minutes / weighted_treatment).floor());
        let capacity_by_beds = to_count((p.beds * total_minutes / weighted_treatment).floor());
        let throughput = arrivals.min(capacity_by_doctors).min(capacity_by_beds);
        let max_capacity = capacity_by_doctors.max(capacity_by_beds);

        let load_factor = if arrivals > 0 {
            arrivals as f64 / max_capacity.max(1) as f64
        } else {
            0.0
        };
        let baseline_wait = if load_factor > 1.0 {
            weighted_treatment * (load_factor - 1.0) * OVERLOAD_WAIT_FACTOR
        } else {
            0.0
        };
        // A boost below 1 lengthens the emergency wait.
        let emergency_wait = saturate(baseline_wait / p.emergency_priority_boost);
        let clinic_wait = baseline_wait;

        let avg_wait = if arrivals > 0 {
            let emergency_share = emergency_arrivals as f64 / arrivals as f64;
            let clinic_share = clinic_arrivals as f64 / arrivals as f64;
            let weighted = saturate(emergency_wait * emergency_share + clinic_wait * clinic_share);
            round_tenths(finite_non_negative(weighted))
        } else {
            0.0
        };

        let utilization = if max_capacity > 0 {
            utilization_pct(throughput as f64 / max_capacity as f64)
        } else {
            0
        };

        debug!(
            engine = %EngineKey::PriorityBeds,
            arrivals,
            weighted_treatment,
            capacity_by_doctors,
            capacity_by_beds,
            load_factor,
            baseline_wait,
            "bed allocation computed"
        );

        let summary = EngineSummary {
            engine: EngineKey::PriorityBeds,
            avg_wait_minutes: avg_wait,
            patients_served: throughput,
            overall_utilization_pct: utilization,
            resources: ResourceEcho::Beds {
                beds: to_units(p.beds),
                doctors: to_units(p.doctors),
                nurses: to_units(p.nurses),
            },
        };

        let diagnostics = Diagnostics::Beds(BedDiagnostics {
            duration_hours: p.duration_hours,
            expected_arrivals: arrivals,
            expected_emergency_arrivals: emergency_arrivals,
            expected_clinic_arrivals: clinic_arrivals,
            avg_treatment_minutes_emergency: te,
            avg_treatment_minutes_clinic: tc,
            avg_treatment_minutes_weighted: weighted_treatment,
            capacity_by_doctors,
            capacity_by_beds,
            throughput,
            load_factor,
            baseline_wait_minutes: baseline_wait,
            emergency_wait_minutes: emergency_wait,
            clinic_wait_minutes: clinic_wait,
            emergency_priority_boost: p.emergency_priority_boost,
            emergency_beds: to_units(p.emergency_beds),
            surgeons: to_units(p.surgeons),
            operating_rooms: to_units(p.operating_rooms),
        });

        Estimate {
            summary,
            diagnostics,
        }
    }
}
