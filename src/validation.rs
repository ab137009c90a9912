//! Output validation for engine summaries.
//!
//! Every engine clamps its own numeric degeneracies, but a summary is
//! still checked before it may enter the candidate pool. Detects:
//! - Non-finite or negative waits
//! - Utilization outside 0..=100
//! - More patients served than could have arrived
//! - A summary labelled with the wrong engine
//! - Non-finite diagnostic arrival counts

use crate::models::{Diagnostics, EngineKey, EngineSummary};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Slack allowed when comparing served patients against fractional arrivals.
const ARRIVAL_TOLERANCE: f64 = 1e-9;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Average wait is NaN or infinite.
    NonFiniteWait,
    /// Average wait is below zero.
    NegativeWait,
    /// Utilization above 100 percent.
    UtilizationOutOfRange,
    /// Patients served exceeds the theoretical arrival count.
    ServedExceedsArrivals,
    /// Summary engine does not match the engine that ran.
    EngineMismatch,
    /// Arrival count in the diagnostics is NaN, infinite or negative.
    InvalidArrivals,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a summary against the engine that produced it.
///
/// Checks:
/// 1. `summary.engine == expected`
/// 2. `avg_wait_minutes` finite and ≥ 0
/// 3. `overall_utilization_pct` ≤ 100
/// 4. `expected_arrivals` finite and ≥ 0
/// 5. `patients_served` ≤ `expected_arrivals`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_summary(
    expected: EngineKey,
    summary: &EngineSummary,
    expected_arrivals: f64,
) -> ValidationResult {
    let mut errors = Vec::new();

    if summary.engine != expected {
        errors.push(ValidationError::new(
            ValidationErrorKind::EngineMismatch,
            format!(
                "Summary labelled {} but produced by {}",
                summary.engine, expected
            ),
        ));
    }

    let wait = summary.avg_wait_minutes;
    if !wait.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFiniteWait,
            format!("Average wait is not finite: {wait}"),
        ));
    } else if wait < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeWait,
            format!("Average wait is negative: {wait}"),
        ));
    }

    if summary.overall_utilization_pct > 100 {
        errors.push(ValidationError::new(
            ValidationErrorKind::UtilizationOutOfRange,
            format!(
                "Utilization {}% exceeds 100%",
                summary.overall_utilization_pct
            ),
        ));
    }

    if !expected_arrivals.is_finite() || expected_arrivals < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidArrivals,
            format!("Expected arrivals is invalid: {expected_arrivals}"),
        ));
    } else if summary.patients_served as f64 > expected_arrivals + ARRIVAL_TOLERANCE {
        errors.push(ValidationError::new(
            ValidationErrorKind::ServedExceedsArrivals,
            format!(
                "Served {} patients but only {} could arrive",
                summary.patients_served, expected_arrivals
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a summary using the arrival count recorded in its diagnostics.
pub fn validate_with_diagnostics(
    expected: EngineKey,
    summary: &EngineSummary,
    diagnostics: &Diagnostics,
) -> ValidationResult {
    validate_summary(expected, summary, diagnostics.expected_arrivals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceEcho;

    fn make_summary(wait: f64, served: u64, util: u8) -> EngineSummary {
        EngineSummary {
            engine: EngineKey::Queueing,
            avg_wait_minutes: wait,
            patients_served: served,
            overall_utilization_pct: util,
            resources: ResourceEcho::Queueing {
                servers: 1,
                doctors: 1,
                beds: 1,
            },
        }
    }

    #[test]
    fn test_valid_summary() {
        let summary = make_summary(4.2, 24, 50);
        assert!(validate_summary(EngineKey::Queueing, &summary, 24.0).is_ok());
    }

    #[test]
    fn test_non_finite_wait() {
        let summary = make_summary(f64::NAN, 0, 0);
        let errors = validate_summary(EngineKey::Queueing, &summary, 0.0).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonFiniteWait));
    }

    #[test]
    fn test_negative_wait() {
        let summary = make_summary(-1.0, 0, 0);
        let errors = validate_summary(EngineKey::Queueing, &summary, 0.0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeWait);
    }

    #[test]
    fn test_utilization_out_of_range() {
        let summary = make_summary(0.0, 0, 140);
        let errors = validate_summary(EngineKey::Queueing, &summary, 0.0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UtilizationOutOfRange);
    }

    #[test]
    fn test_served_exceeds_arrivals() {
        let summary = make_summary(0.0, 25, 50);
        let errors = validate_summary(EngineKey::Queueing, &summary, 24.0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ServedExceedsArrivals);
    }

    #[test]
    fn test_engine_mismatch() {
        let summary = make_summary(0.0, 0, 0);
        let errors = validate_summary(EngineKey::OrScheduling, &summary, 0.0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EngineMismatch);
    }

    #[test]
    fn test_invalid_arrivals() {
        let summary = make_summary(0.0, 0, 0);
        let errors =
            validate_summary(EngineKey::Queueing, &summary, f64::INFINITY).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidArrivals);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let summary = make_summary(f64::INFINITY, 10, 200);
        let errors = validate_summary(EngineKey::PriorityBeds, &summary, 5.0).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
