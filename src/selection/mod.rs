//! Best-of-N selection over engine candidates.
//!
//! Candidates are ranked by a composable chain of criteria. The standard
//! policy prefers the lowest average wait and breaks ties by the highest
//! utilization; remaining ties keep evaluation order.
//!
//! # Usage
//!
//! ```
//! use u_hospital::engines::evaluate;
//! use u_hospital::models::{EngineKey, SimulationParameters};
//! use u_hospital::selection::select_best;
//!
//! let params = SimulationParameters::new()
//!     .with("clinicPatientsPerHour", 6)
//!     .with("doctors", 3)
//!     .with("beds", 10);
//! let candidates = EngineKey::ALL
//!     .iter()
//!     .map(|&key| evaluate(key, &params).unwrap())
//!     .collect();
//!
//! let result = select_best(candidates).unwrap();
//! assert_eq!(result.all_results.len(), 3);
//! assert_eq!(result.summary.engine, result.best_engine_key);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//!   (lexicographic priority rules)

pub mod criteria;
mod policy;
mod result;

pub use policy::{EvaluationMode, SelectionPolicy, TieBreaker, DEFAULT_EPSILON, MAX_EPSILON};
pub use result::SelectionResult;

use std::fmt::Debug;

use crate::error::SelectionError;
use crate::models::Candidate;

/// Score returned by a ranking criterion.
///
/// Lower scores rank first.
pub type CriterionScore = f64;

/// A criterion that scores candidates for ranking.
///
/// # Score Convention
/// **Lower score = better candidate.** Criteria that reward larger values
/// (utilization, throughput) return the negated value.
pub trait RankingCriterion: Send + Sync + Debug {
    /// Criterion name (e.g., "WAIT").
    fn name(&self) -> &'static str;

    /// Scores a candidate.
    fn score(&self, candidate: &Candidate) -> CriterionScore;

    /// Criterion description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Selects the best candidate with the standard policy.
///
/// # Errors
/// [`SelectionError::NoCandidates`] if `candidates` is empty.
pub fn select_best(candidates: Vec<Candidate>) -> Result<SelectionResult, SelectionError> {
    SelectionPolicy::standard().select_best(candidates)
}


#[cfg(test)]
mod tests {
    use super::test_support::candidate;
    use super::*;
    use crate::models::EngineKey;

    #[test]
    fn test_lowest_wait_wins() {
        let result = select_best(vec![
            candidate(EngineKey::Queueing, 10.0, 50),
            candidate(EngineKey::PriorityBeds, 10.0, 80),
            candidate(EngineKey::OrScheduling, 5.0, 10),
        ])
        .unwrap();
        assert_eq!(result.best_engine_key, EngineKey::OrScheduling);
        assert_eq!(result.summary.avg_wait_minutes, 5.0);
        assert_eq!(result.all_results[1].key, EngineKey::PriorityBeds);
        assert_eq!(result.all_results[2].key, EngineKey::Queueing);
    }

    #[test]
    fn test_utilization_breaks_wait_tie() {
        let result = select_best(vec![
            candidate(EngineKey::Queueing, 10.0, 50),
            candidate(EngineKey::PriorityBeds, 10.0, 80),
        ])
        .unwrap();
        assert_eq!(result.best_engine_key, EngineKey::PriorityBeds);
    }

    #[test]
    fn test_full_tie_keeps_evaluation_order() {
        let result = select_best(vec![
            candidate(EngineKey::OrScheduling, 0.0, 0),
            candidate(EngineKey::Queueing, 0.0, 0),
        ])
        .unwrap();
        assert_eq!(result.best_engine_key, EngineKey::OrScheduling);
    }

    #[test]
    fn test_empty_is_error() {
        assert_eq!(
            select_best(Vec::new()).unwrap_err(),
            SelectionError::NoCandidates
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let pool = || {
            vec![
                candidate(EngineKey::Queueing, 3.2, 61),
                candidate(EngineKey::PriorityBeds, 3.2, 61),
                candidate(EngineKey::OrScheduling, 7.0, 99),
            ]
        };
        let a = select_best(pool()).unwrap();
        let b = select_best(pool()).unwrap();
        assert_eq!(a.best_engine_key, b.best_engine_key);
        let keys = |r: &SelectionResult| r.all_results.iter().map(|c| c.key).collect::<Vec<_>>();
        assert_eq!(keys(&a), keys(&b));
    }
}
