//! Engine C: operating-room scheduling.
//!
//! Surgeries flow through an OR (bounded by rooms and surgeons) and then a
//! recovery bed. Served patients are the surgeries that clear both stages.

use tracing::debug;

use super::kpi::{finite_non_negative, round_tenths, to_count, to_units, utilization_pct};
use super::{AnalyticalEngine, Estimate};
use crate::models::{
    Diagnostics, EngineKey, EngineSummary, ResourceEcho, SimulationParameters, SurgeryDiagnostics,
};
use crate::normalize::SurgeryParams;

/// Share of the excess OR load that turns into waiting time.
const OVERLOAD_WAIT_FACTOR: f64 = 0.5;

/// Engine C: OR → recovery pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrSchedulingEngine;

impl AnalyticalEngine for OrSchedulingEngine {
    fn key(&self) -> EngineKey {
        EngineKey::OrScheduling
    }

    fn description(&self) -> &'static str {
        "Operating room and recovery bed throughput"
    }

    fn estimate(&self, params: &SimulationParameters) -> Estimate {
        let p = SurgeryParams::from_parameters(params);
        let total_minutes = p.duration_hours * 60.0;
        let surgery = p.avg_surgery_minutes;

        let arrivals = to_count((p.surgeries_per_hour * p.duration_hours).round());
        let capacity_by_or = to_count((p.operating_rooms * total_minutes / surgery).floor());
        let capacity_by_surgeons = to_count((p.surgeons * total_minutes / surgery).floor());
        let doable = arrivals.min(capacity_by_or).min(capacity_by_surgeons);
        let recovery_capacity =
            to_count((p.recovery_beds * total_minutes / p.avg_recovery_minutes).floor());
        let served = doable.min(recovery_capacity);

        let or_minutes = (p.operating_rooms * total_minutes).max(1.0);
        let or_utilization = (served as f64 * surgery / or_minutes).min(1.0);

        let load_factor = if arrivals > 0 {
            arrivals as f64 / capacity_by_or.max(1) as f64
        } else {
            0.0
        };
        let wait = (load_factor - 1.0).max(0.0) * surgery * OVERLOAD_WAIT_FACTOR;

        debug!(
            engine = %EngineKey::OrScheduling,
            arrivals,
            capacity_by_or,
            capacity_by_surgeons,
            recovery_capacity,
            served,
            "or schedule computed"
        );

        let summary = EngineSummary {
            engine: EngineKey::OrScheduling,
            avg_wait_minutes: round_tenths(finite_non_negative(wait)),
            patients_served: served,
            overall_utilization_pct: utilization_pct(or_utilization),
            resources: ResourceEcho::Surgery {
                operating_rooms: to_units(p.operating_rooms),
                surgeons: to_units(p.surgeons),
                recovery_beds: to_units(p.recovery_beds),
            },
        };

        let diagnostics = Diagnostics::Surgery(SurgeryDiagnostics {
            duration_hours: p.duration_hours,
            surgeries_per_hour: p.surgeries_per_hour,
            expected_arrivals: arrivals,
            capacity_by_or,
            capacity_by_surgeons,
            doable,
            recovery_capacity,
            avg_surgery_minutes: surgery,
            avg_recovery_minutes: p.avg_recovery_minutes,
            load_factor,
            or_utilization,
        });

        Estimate {
            summary,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn diagnostics(estimate: &Estimate) -> SurgeryDiagnostics {
        match &estimate.diagnostics {
            Diagnostics::Surgery(d) => d.clone(),
            other => panic!("unexpected diagnostics {other:?}"),
        }
    }

    #[test]
    fn test_daily_schedule_scenario() {
        let params = SimulationParameters::new()
            .with("scheduledSurgeriesPerDay", 6)
            .with("avgSurgeryMinutes", 90)
            .with("operatingRooms", 2)
            .with("recoveryBeds", 4)
            .with("durationHours", 10);
        let estimate = OrSchedulingEngine.estimate(&params);
        let d = diagnostics(&estimate);

        // 0.25/h * 10h = 2.5, rounded half up
        assert_eq!(d.expected_arrivals, 3);
        assert_eq!(d.capacity_by_or, 13);
        // ceil(2 * 1.5) surgeons
        assert_eq!(d.capacity_by_surgeons, 20);
        assert_eq!(d.recovery_capacity, 40);
        assert_eq!(estimate.summary.patients_served, 3);
        assert_eq!(estimate.summary.avg_wait_minutes, 0.0);
        assert!((d.or_utilization - 0.225).abs() < 1e-10);
        assert_eq!(
            estimate.summary.resources,
            ResourceEcho::Surgery {
                operating_rooms: 2,
                surgeons: 3,
                recovery_beds: 4
            }
        );
    }

    #[test]
    fn test_overbooked_rooms_build_wait() {
        // 2/h for 8h = 16 surgeries; one room fits floor(480/60) = 8
        let params = SimulationParameters::new()
            .with("surgeriesPerHour", 2)
            .with("avgSurgeryMinutes", 60);
        let estimate = OrSchedulingEngine.estimate(&params);
        let d = diagnostics(&estimate);

        assert_eq!(d.capacity_by_or, 8);
        assert!((d.load_factor - 2.0).abs() < 1e-10);
        // (2 - 1) * 60 * 0.5
        assert_eq!(estimate.summary.avg_wait_minutes, 30.0);
        assert_eq!(estimate.summary.patients_served, 8);
        assert_eq!(estimate.summary.overall_utilization_pct, 100);
    }

    #[test]
    fn test_recovery_is_bottleneck() {
        let params = SimulationParameters::new()
            .with("surgeriesPerHour", 4)
            .with("avgSurgeryMinutes", 30)
            .with("operatingRooms", 4)
            .with("recoveryBeds", 1)
            .with("avgRecoveryMinutes", 240);
        let estimate = OrSchedulingEngine.estimate(&params);
        let d = diagnostics(&estimate);

        assert_eq!(d.doable, 32);
        assert_eq!(d.recovery_capacity, 2);
        assert_eq!(estimate.summary.patients_served, 2);
    }

    #[test]
    fn test_no_surgeries() {
        let estimate = OrSchedulingEngine.estimate(&SimulationParameters::new());
        assert_eq!(estimate.summary.patients_served, 0);
        assert_eq!(estimate.summary.avg_wait_minutes, 0.0);
        assert_eq!(estimate.summary.overall_utilization_pct, 0);
        assert_eq!(diagnostics(&estimate).load_factor, 0.0);
    }

    proptest! {
        #[test]
        fn prop_served_within_every_capacity(
            per_hour in 0.0f64..50.0,
            rooms in 0u32..20,
            surgeons in 0u32..30,
            recovery in 0u32..40,
            surgery_minutes in 0.0f64..600.0,
            recovery_minutes in 0.0f64..1200.0,
            hours in 0.0f64..48.0,
        ) {
            let params = SimulationParameters::new()
                .with("surgeriesPerHour", per_hour)
                .with("operatingRooms", rooms)
                .with("surgeons", surgeons)
                .with("recoveryBeds", recovery)
                .with("avgSurgeryMinutes", surgery_minutes)
                .with("avgRecoveryMinutes", recovery_minutes)
                .with("durationHours", hours);
            let candidate = OrSchedulingEngine.evaluate(&params).unwrap();
            let d = match &candidate.details.diagnostics {
                Diagnostics::Surgery(d) => d.clone(),
                _ => unreachable!(),
            };
            let served = candidate.summary.patients_served;
            prop_assert!(served <= d.recovery_capacity);
            prop_assert!(served <= d.capacity_by_or);
            prop_assert!(served <= d.capacity_by_surgeons);
            prop_assert!(served <= d.expected_arrivals);
            prop_assert!(candidate.summary.overall_utilization_pct <= 100);
            prop_assert!(candidate.summary.avg_wait_minutes >= 0.0);
        }
    }
}
