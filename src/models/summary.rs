//! Engine identifiers and the comparable summary each engine produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EngineDetails;
use crate::error::EngineError;

/// Identifier of one of the three analytical engines.
///
/// Wire names (`engineA`, `engineB`, `engineC`) are stable and used as
/// storage keys by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EngineKey {
    /// Combined M/M/c queue (Erlang-C).
    #[serde(rename = "engineA")]
    Queueing,
    /// Two-class priority bed allocator.
    #[serde(rename = "engineB")]
    PriorityBeds,
    /// Two-stage operating room → recovery model.
    #[serde(rename = "engineC")]
    OrScheduling,
}

impl EngineKey {
    /// All engines in evaluation order.
    pub const ALL: [EngineKey; 3] = [
        EngineKey::Queueing,
        EngineKey::PriorityBeds,
        EngineKey::OrScheduling,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKey::Queueing => "engineA",
            EngineKey::PriorityBeds => "engineB",
            EngineKey::OrScheduling => "engineC",
        }
    }

    /// Human-readable engine name.
    pub fn display_name(&self) -> &'static str {
        match self {
            EngineKey::Queueing => "Queueing (M/M/c) Approximation",
            EngineKey::PriorityBeds => "Priority Bed Allocator",
            EngineKey::OrScheduling => "OR Scheduling Sim",
        }
    }
}

impl fmt::Display for EngineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "engineA" => Ok(EngineKey::Queueing),
            "engineB" => Ok(EngineKey::PriorityBeds),
            "engineC" => Ok(EngineKey::OrScheduling),
            other => Err(EngineError::UnknownEngine {
                key: other.to_string(),
            }),
        }
    }
}

/// Resource counts an engine actually used, echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResourceEcho {
    /// Parallel servers of the merged queue.
    #[serde(rename_all = "camelCase")]
    Queueing { servers: u32, doctors: u32, beds: u32 },
    /// Shared bed pool and its staff.
    #[serde(rename_all = "camelCase")]
    Beds { beds: u32, doctors: u32, nurses: u32 },
    /// Operating theatre and recovery stage.
    #[serde(rename_all = "camelCase")]
    Surgery {
        operating_rooms: u32,
        surgeons: u32,
        recovery_beds: u32,
    },
}

/// Comparable output of a single engine run.
///
/// # Invariants
/// - `avg_wait_minutes` is finite and non-negative
/// - `overall_utilization_pct` is within `0..=100`
/// - `patients_served` never exceeds the theoretical arrival count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSummary {
    /// Engine that produced this summary.
    pub engine: EngineKey,
    /// Average patient wait (minutes, one decimal).
    pub avg_wait_minutes: f64,
    /// Patients served over the horizon.
    pub patients_served: u64,
    /// Utilization of the engine's reference resource (percent).
    pub overall_utilization_pct: u8,
    /// Resource echo.
    pub resources: ResourceEcho,
}

/// One engine's full output: the comparable summary plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Engine that produced the result.
    pub key: EngineKey,
    /// Comparable summary.
    pub summary: EngineSummary,
    /// Diagnostic payload (not used for ranking).
    pub details: EngineDetails,
}

impl Candidate {
    /// Average wait in minutes.
    pub fn avg_wait_minutes(&self) -> f64 {
        self.summary.avg_wait_minutes
    }

    /// Utilization percentage.
    pub fn utilization_pct(&self) -> u8 {
        self.summary.overall_utilization_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_key_round_trip_names() {
        for key in EngineKey::ALL {
            assert_eq!(key.as_str().parse::<EngineKey>().unwrap(), key);
        }
        assert!("engineZ".parse::<EngineKey>().is_err());
        assert_eq!(EngineKey::OrScheduling.to_string(), "engineC");
        assert_eq!(
            EngineKey::PriorityBeds.display_name(),
            "Priority Bed Allocator"
        );
    }

    #[test]
    fn test_summary_wire_format() {
        let summary = EngineSummary {
            engine: EngineKey::Queueing,
            avg_wait_minutes: 2.5,
            patients_served: 24,
            overall_utilization_pct: 50,
            resources: ResourceEcho::Queueing {
                servers: 3,
                doctors: 3,
                beds: 10,
            },
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["engine"], json!("engineA"));
        assert_eq!(value["avgWaitMinutes"], json!(2.5));
        assert_eq!(value["patientsServed"], json!(24));
        assert_eq!(value["overallUtilizationPct"], json!(50));
        assert_eq!(value["resources"]["servers"], json!(3));
    }

    #[test]
    fn test_surgery_echo_camel_case() {
        let echo = ResourceEcho::Surgery {
            operating_rooms: 2,
            surgeons: 3,
            recovery_beds: 4,
        };
        let value = serde_json::to_value(echo).unwrap();
        assert_eq!(value["kind"], json!("surgery"));
        assert_eq!(value["operatingRooms"], json!(2));
        assert_eq!(value["recoveryBeds"], json!(4));
    }
}
