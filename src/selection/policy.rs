//! Selection policy for multi-criteria candidate ranking.
//!
//! Composes ranking criteria with configurable evaluation modes and
//! tie-breaking strategies.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::criteria::{HighestUtilization, LowestWait};
use super::{CriterionScore, RankingCriterion, SelectionResult};
use crate::error::SelectionError;
use crate::models::Candidate;

/// Comparison tolerance between criterion scores.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Largest accepted tolerance: half the 0.1 step waits are rounded to.
///
/// Below it, two rounded waits compare equal only when they are the same
/// value, which keeps "equal within epsilon" transitive.
pub const MAX_EPSILON: f64 = 0.05;

/// How multiple criteria are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Apply criteria in sequence; use the next one only on ties.
    #[default]
    Sequential,
    /// Compare the weighted sum of all criterion scores.
    Weighted,
}

/// How ties are broken after all criteria are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep evaluation order (stable sort).
    #[default]
    EvaluationOrder,
    /// Engine key order (A before B before C).
    ByEngineKey,
}

#[derive(Clone)]
struct WeightedCriterion {
    criterion: Arc<dyn RankingCriterion>,
    weight: f64,
}

/// A composable ranking policy for engine candidates.
///
/// # Example
/// ```
/// use u_hospital::selection::criteria::{HighestUtilization, LowestWait};
/// use u_hospital::selection::SelectionPolicy;
///
/// let policy = SelectionPolicy::new()
///     .with_criterion(LowestWait)
///     .with_criterion(HighestUtilization);
/// assert_eq!(policy.criterion_names(), vec!["WAIT", "UTIL"]);
/// ```
#[derive(Clone)]
pub struct SelectionPolicy {
    criteria: Vec<WeightedCriterion>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl SelectionPolicy {
    /// Creates an empty policy. Without criteria every candidate ties.
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::EvaluationOrder,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Lowest wait, then highest utilization, then evaluation order.
    pub fn standard() -> Self {
        Self::new()
            .with_criterion(LowestWait)
            .with_criterion(HighestUtilization)
    }

    /// Adds a criterion (weight 1.0).
    pub fn with_criterion<C: RankingCriterion + 'static>(self, criterion: C) -> Self {
        self.with_weighted_criterion(criterion, 1.0)
    }

    /// Adds a weighted criterion. Weights only matter in Weighted mode.
    pub fn with_weighted_criterion<C: RankingCriterion + 'static>(
        mut self,
        criterion: C,
        weight: f64,
    ) -> Self {
        self.criteria.push(WeightedCriterion {
            criterion: Arc::new(criterion),
            weight,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets the score comparison tolerance.
    ///
    /// The magnitude is used and clamped to `0..=MAX_EPSILON`; NaN keeps
    /// [`DEFAULT_EPSILON`].
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon.is_nan() {
            DEFAULT_EPSILON
        } else {
            epsilon.abs().min(MAX_EPSILON)
        };
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Criterion names in evaluation order.
    pub fn criterion_names(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|c| c.criterion.name()).collect()
    }

    /// Ranks candidates, best first.
    ///
    /// Returns indices into the original slice. The sort is stable, so
    /// candidates that tie on every criterion keep their relative order
    /// unless [`TieBreaker::ByEngineKey`] is set.
    pub fn sort_indices(&self, candidates: &[Candidate]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        if candidates.is_empty() {
            return indices;
        }

        match self.mode {
            EvaluationMode::Sequential => {
                let scores: Vec<Vec<CriterionScore>> =
                    candidates.iter().map(|c| self.evaluate(c)).collect();
                indices.sort_by(|&a, &b| {
                    self.compare_sequential(&scores[a], &scores[b])
                        .then_with(|| self.break_tie(&candidates[a], &candidates[b]))
                });
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = candidates.iter().map(|c| self.weighted_score(c)).collect();
                indices.sort_by(|&a, &b| {
                    self.compare_scores(scores[a], scores[b])
                        .then_with(|| self.break_tie(&candidates[a], &candidates[b]))
                });
            }
        }

        indices
    }

    /// Ranks candidates and wraps the winner.
    ///
    /// # Errors
    /// [`SelectionError::NoCandidates`] if `candidates` is empty.
    pub fn select_best(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<SelectionResult, SelectionError> {
        let order = self.sort_indices(&candidates);
        let mut slots: Vec<Option<Candidate>> = candidates.into_iter().map(Some).collect();
        let ranked: Vec<Candidate> = order.iter().filter_map(|&i| slots[i].take()).collect();

        let best = ranked.first().ok_or(SelectionError::NoCandidates)?;
        debug!(
            best = %best.key,
            avg_wait_minutes = best.summary.avg_wait_minutes,
            utilization_pct = best.summary.overall_utilization_pct,
            candidates = ranked.len(),
            "candidate selected"
        );

        Ok(SelectionResult {
            best_engine_key: best.key,
            summary: best.summary.clone(),
            all_results: ranked,
        })
    }

    /// Scores a single candidate with each criterion (weighted).
    pub fn evaluate(&self, candidate: &Candidate) -> Vec<CriterionScore> {
        self.criteria
            .iter()
            .map(|wc| wc.criterion.score(candidate) * wc.weight)
            .collect()
    }

    fn compare_sequential(&self, a: &[CriterionScore], b: &[CriterionScore]) -> Ordering {
        a.iter()
            .zip(b)
            .map(|(&sa, &sb)| self.compare_scores(sa, sb))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn compare_scores(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() > self.epsilon {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }

    fn break_tie(&self, a: &Candidate, b: &Candidate) -> Ordering {
        match self.tie_breaker {
            TieBreaker::EvaluationOrder => Ordering::Equal,
            TieBreaker::ByEngineKey => a.key.cmp(&b.key),
        }
    }

    fn weighted_score(&self, candidate: &Candidate) -> f64 {
        self.evaluate(candidate).iter().sum()
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionPolicy")
            .field(
                "criteria",
                &self
                    .criteria
                    .iter()
                    .map(|c| format!("{}(w={})", c.criterion.name(), c.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .field("epsilon", &self.epsilon)
            .finish()
    }
}
