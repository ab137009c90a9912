//! Built-in ranking criteria.
//!
//! # Score Convention
//! All criteria return lower scores for better candidates.

use super::{CriterionScore, RankingCriterion};
use crate::models::Candidate;

/// Lowest average wait first.
#[derive(Debug, Clone, Copy)]
pub struct LowestWait;

impl RankingCriterion for LowestWait {
    fn name(&self) -> &'static str {
        "WAIT"
    }

    fn score(&self, candidate: &Candidate) -> CriterionScore {
        let wait = candidate.avg_wait_minutes();
        // a wait that slipped past validation ranks last
        if wait.is_nan() {
            f64::INFINITY
        } else {
            wait
        }
    }

    fn description(&self) -> &'static str {
        "Lowest Average Wait"
    }
}

/// Highest utilization first.
#[derive(Debug, Clone, Copy)]
pub struct HighestUtilization;

impl RankingCriterion for HighestUtilization {
    fn name(&self) -> &'static str {
        "UTIL"
    }

    fn score(&self, candidate: &Candidate) -> CriterionScore {
        -(candidate.utilization_pct() as f64)
    }

    fn description(&self) -> &'static str {
        "Highest Utilization"
    }
}

/// Most patients served first.
///
/// Not part of the standard policy; available for custom chains.
#[derive(Debug, Clone, Copy)]
pub struct MostPatientsServed;

impl RankingCriterion for MostPatientsServed {
    fn name(&self) -> &'static str {
        "SERVED"
    }

    fn score(&self, candidate: &Candidate) -> CriterionScore {
        -(candidate.summary.patients_served as f64)
    }

    fn description(&self) -> &'static str {
        "Most Patients Served"
    }
}
