//! Parameter normalization.
//!
//! Turns an open, loosely-typed parameter record into the numeric inputs
//! an engine needs. Normalization is total: missing, non-numeric or
//! out-of-range input resolves to a documented default or floor, never to
//! an error.
//!
//! # Rules
//!
//! - **Alias chains**: a quantity may arrive under several names; the
//!   first populated one wins ([`FieldSpec`]).
//! - **Floors**: resource counts that must exist floor to 1, optional
//!   counts and rates floor to 0.
//! - **Day heuristic**: a treatment duration ≤ 10 is read as days and
//!   scaled to minutes ([`treatment_minutes`]). This is a compatibility rule
//!   for mixed-unit callers, not a unit check: a genuine 8-minute
//!   treatment is also scaled.
//! - **Per-day rates** are divided by 24 ([`per_day_to_per_hour`]).
//!
//! # Usage
//!
//! ```
//! use u_hospital::models::{EngineKey, SimulationParameters};
//! use u_hospital::normalize::{normalize, NormalizedParams};
//!
//! let params = SimulationParameters::new().with("avgTreatmentMinutesClinic", 2);
//! match normalize(EngineKey::PriorityBeds, &params) {
//!     NormalizedParams::Beds(p) => assert_eq!(p.treatment_minutes_clinic, 2880.0),
//!     _ => unreachable!(),
//! }
//! ```

mod field;
mod params;

pub use field::FieldSpec;
pub use params::{BedParams, QueueingParams, SurgeryParams};

use serde::Serialize;

use crate::models::{EngineKey, SimulationParameters};

/// Treatment durations at or below this value are read as days.
pub const DAY_HEURISTIC_THRESHOLD: f64 = 10.0;

/// Minutes in a day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Applies the day → minute heuristic to a treatment duration.
///
/// ```
/// use u_hospital::normalize::treatment_minutes;
/// assert_eq!(treatment_minutes(2.0), 2880.0);
/// assert_eq!(treatment_minutes(10.0), 14_400.0);
/// assert_eq!(treatment_minutes(15.0), 15.0);
/// ```
pub fn treatment_minutes(value: f64) -> f64 {
    if value <= DAY_HEURISTIC_THRESHOLD {
        value * MINUTES_PER_DAY
    } else {
        value
    }
}

/// Converts a per-day rate to a per-hour rate.
pub fn per_day_to_per_hour(per_day: f64) -> f64 {
    per_day / 24.0
}

/// Engine-specific normalized inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NormalizedParams {
    Queueing(QueueingParams),
    Beds(BedParams),
    Surgery(SurgeryParams),
}

impl NormalizedParams {
    /// Engine these inputs belong to.
    pub fn engine(&self) -> EngineKey {
        match self {
            NormalizedParams::Queueing(_) => EngineKey::Queueing,
            NormalizedParams::Beds(_) => EngineKey::PriorityBeds,
            NormalizedParams::Surgery(_) => EngineKey::OrScheduling,
        }
    }

    /// Observation horizon in hours.
    pub fn duration_hours(&self) -> f64 {
        match self {
            NormalizedParams::Queueing(p) => p.duration_hours,
            NormalizedParams::Beds(p) => p.duration_hours,
            NormalizedParams::Surgery(p) => p.duration_hours,
        }
    }
}

/// Normalizes raw parameters for the given engine.
///
/// Never fails. A non-object parameter document resolves to all defaults.
pub fn normalize(engine: EngineKey, params: &SimulationParameters) -> NormalizedParams {
    match engine {
        EngineKey::Queueing => NormalizedParams::Queueing(QueueingParams::from_parameters(params)),
        EngineKey::PriorityBeds => NormalizedParams::Beds(BedParams::from_parameters(params)),
        EngineKey::OrScheduling => {
            NormalizedParams::Surgery(SurgeryParams::from_parameters(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_heuristic_boundary() {
        assert_eq!(treatment_minutes(2.0), 2880.0);
        assert_eq!(treatment_minutes(10.0), 14_400.0);
        assert_eq!(treatment_minutes(10.5), 10.5);
        assert_eq!(treatment_minutes(15.0), 15.0);
    }

    #[test]
    fn test_per_day_to_per_hour() {
        assert!((per_day_to_per_hour(48.0) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_dispatches_by_engine() {
        let params = SimulationParameters::new();
        for key in EngineKey::ALL {
            let normalized = normalize(key, &params);
            assert_eq!(normalized.engine(), key);
            assert_eq!(normalized.duration_hours(), 8.0);
        }
    }

    #[test]
    fn test_normalize_is_total_for_non_objects() {
        for doc in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let params = SimulationParameters::from_value(doc);
            for key in EngineKey::ALL {
                assert_eq!(normalize(key, &params).duration_hours(), 8.0);
            }
        }
    }
}
