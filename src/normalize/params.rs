//! Per-engine normalized parameter records and their field tables.

use serde::Serialize;

use super::{per_day_to_per_hour, treatment_minutes, FieldSpec};
use crate::models::SimulationParameters;

// ======================== Shared fields ========================

fn duration_hours() -> FieldSpec {
    FieldSpec::new("durationHours")
        .default_value(8.0)
        .positive_only()
}

fn emergency_per_hour() -> FieldSpec {
    FieldSpec::new("emergencyPatientsPerHour").alias("emergencyArrivalsPerHour")
}

fn clinic_per_hour() -> FieldSpec {
    FieldSpec::new("clinicPatientsPerHour").alias("clinicArrivalsPerHour")
}

// ======================== Queueing (A) ========================

/// Normalized inputs of the queueing engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueingParams {
    pub duration_hours: f64,
    pub emergency_per_hour: f64,
    pub clinic_per_hour: f64,
    /// Mean service time per patient (minutes, ≥ 1).
    pub avg_service_minutes: f64,
    pub doctors: f64,
    pub beds: f64,
}

impl QueueingParams {
    /// Reads and normalizes the queueing fields.
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            duration_hours: duration_hours().resolve(params),
            emergency_per_hour: emergency_per_hour().resolve(params),
            clinic_per_hour: clinic_per_hour().resolve(params),
            avg_service_minutes: FieldSpec::new("avgServiceMinutes")
                .default_value(30.0)
                .floor(1.0)
                .resolve(params),
            doctors: FieldSpec::new("doctors")
                .default_value(1.0)
                .floor(1.0)
                .count()
                .resolve(params),
            beds: FieldSpec::new("beds")
                .default_value(1.0)
                .floor(1.0)
                .count()
                .resolve(params),
        }
    }

    /// Parallel servers: a patient needs both a doctor and a bed.
    pub fn servers(&self) -> f64 {
        self.doctors.min(self.beds).max(1.0)
    }

    /// Combined arrivals per hour.
    pub fn arrivals_per_hour(&self) -> f64 {
        self.emergency_per_hour + self.clinic_per_hour
    }
}

// ======================== Priority beds (B) ========================

/// Normalized inputs of the priority bed allocator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedParams {
    pub duration_hours: f64,
    pub emergency_per_hour: f64,
    pub clinic_per_hour: f64,
    pub beds: f64,
    pub emergency_beds: f64,
    pub nurses: f64,
    pub doctors: f64,
    pub surgeons: f64,
    pub operating_rooms: f64,
    /// Divisor applied to the emergency wait (> 0; below 1 lengthens it).
    pub emergency_priority_boost: f64,
    /// Emergency treatment time in minutes, after the day heuristic.
    pub treatment_minutes_emergency: f64,
    /// Clinic treatment time in minutes, after the day heuristic.
    pub treatment_minutes_clinic: f64,
}

impl BedParams {
    /// Reads and normalizes the bed allocator fields.
    ///
    /// Staff defaults scale with the bed pool: emergency beds 30%,
    /// nurses 50%, doctors 20% (rounded up).
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        let beds = FieldSpec::new("totalBeds")
            .alias("beds")
            .default_value(15.0)
            .floor(1.0)
            .count()
            .resolve(params);

        let emergency_beds = FieldSpec::new("emergencyBeds")
            .count()
            .resolve_or(params, (beds * 0.3).ceil());
        let nurses = FieldSpec::new("nurses")
            .floor(1.0)
            .count()
            .resolve_or(params, (beds * 0.5).ceil());
        let doctors = FieldSpec::new("doctors")
            .floor(1.0)
            .count()
            .resolve_or(params, (beds * 0.2).ceil());

        let treatment_emergency = FieldSpec::new("avgTreatmentMinutesEmergency")
            .alias("avgEmergencyServiceMinutes")
            .default_value(15.0)
            .floor(1.0)
            .resolve(params);
        let treatment_clinic = FieldSpec::new("avgTreatmentMinutesClinic")
            .alias("avgClinicServiceMinutes")
            .default_value(25.0)
            .floor(1.0)
            .resolve(params);

        Self {
            duration_hours: duration_hours().resolve(params),
            emergency_per_hour: emergency_per_hour().resolve(params),
            clinic_per_hour: clinic_per_hour().resolve(params),
            beds,
            emergency_beds,
            nurses,
            doctors,
            surgeons: FieldSpec::new("surgeons").count().resolve(params),
            operating_rooms: FieldSpec::new("operatingRooms").count().resolve(params),
            emergency_priority_boost: FieldSpec::new("emergencyPriorityBoost")
                .default_value(2.0)
                .positive_only()
                .resolve(params),
            treatment_minutes_emergency: treatment_minutes(treatment_emergency),
            treatment_minutes_clinic: treatment_minutes(treatment_clinic),
        }
    }
}

// ======================== OR scheduling (C) ========================

/// Normalized inputs of the OR scheduling engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryParams {
    pub duration_hours: f64,
    /// Surgery arrivals per hour (per-day input already divided by 24).
    pub surgeries_per_hour: f64,
    pub operating_rooms: f64,
    pub surgeons: f64,
    pub recovery_beds: f64,
    pub avg_surgery_minutes: f64,
    pub avg_recovery_minutes: f64,
}

impl SurgeryParams {
    /// Reads and normalizes the OR fields.
    ///
    /// `surgeriesPerHour` wins over `scheduledSurgeriesPerDay`; surgeons
    /// default to 1.5 per room and recovery beds to 2 per room.
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        let per_hour = FieldSpec::new("surgeriesPerHour").lookup(params);
        let per_day = FieldSpec::new("scheduledSurgeriesPerDay").lookup(params);
        let surgeries_per_hour = per_hour
            .or_else(|| per_day.map(per_day_to_per_hour))
            .unwrap_or(0.0)
            .max(0.0);

        let operating_rooms = FieldSpec::new("operatingRooms")
            .default_value(1.0)
            .floor(1.0)
            .count()
            .resolve(params);

        Self {
            duration_hours: duration_hours().resolve(params),
            surgeries_per_hour,
            operating_rooms,
            surgeons: FieldSpec::new("surgeons")
                .floor(1.0)
                .count()
                .resolve_or(params, (operating_rooms * 1.5).ceil()),
            recovery_beds: FieldSpec::new("recoveryBeds")
                .floor(1.0)
                .count()
                .resolve_or(params, operating_rooms * 2.0),
            avg_surgery_minutes: FieldSpec::new("avgSurgeryMinutes")
                .default_value(90.0)
                .floor(1.0)
                .resolve(params),
            avg_recovery_minutes: FieldSpec::new("avgRecoveryMinutes")
                .default_value(60.0)
                .floor(1.0)
                .resolve(params),
        }
    }
}
