//! Bounded numeric helpers shared by the engines.
//!
//! Every summary field passes through one of these before leaving an
//! engine, which keeps the output finite and in range however degenerate
//! the intermediate arithmetic was.

/// Rounds to one decimal place.
///
/// Values too large to scale are already integral and come back unchanged.
pub(crate) fn round_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 10.0
}

/// Clamps `+inf` to `f64::MAX`. NaN and other values pass through.
pub(crate) fn saturate(value: f64) -> f64 {
    value.min(f64::MAX)
}

/// Collapses NaN, infinities and negatives to zero.
pub(crate) fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Converts a load ratio to a percentage in `0..=100`.
///
/// NaN reports 0. Infinite load is full utilization.
pub(crate) fn utilization_pct(ratio: f64) -> u8 {
    if ratio.is_nan() {
        return 0;
    }
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Converts a non-negative real count to an integer (truncating, saturating).
///
/// NaN and negatives map to 0.
pub(crate) fn to_count(value: f64) -> u64 {
    if value > 0.0 {
        value as u64
    } else {
        0
    }
}

/// Converts a resource count to `u32` (saturating).
pub(crate) fn to_units(value: f64) -> u32 {
    if value > 0.0 {
        value as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenths() {
        assert!((round_tenths(2.368) - 2.4).abs() < 1e-10);
        assert!((round_tenths(0.04) - 0.0).abs() < 1e-10);
        assert!((round_tenths(120.0) - 120.0).abs() < 1e-10);
        assert_eq!(round_tenths(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(12.5), 12.5);
        assert!(saturate(f64::NAN).is_nan());
    }

    #[test]
    fn test_finite_non_negative() {
        assert_eq!(finite_non_negative(3.5), 3.5);
        assert_eq!(finite_non_negative(-1.0), 0.0);
        assert_eq!(finite_non_negative(f64::NAN), 0.0);
        assert_eq!(finite_non_negative(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_utilization_pct() {
        assert_eq!(utilization_pct(0.5), 50);
        assert_eq!(utilization_pct(1.7), 100);
        assert_eq!(utilization_pct(-0.2), 0);
        assert_eq!(utilization_pct(f64::NAN), 0);
        assert_eq!(utilization_pct(f64::INFINITY), 100);
        assert_eq!(utilization_pct(f64::NEG_INFINITY), 0);
        assert_eq!(utilization_pct(0.996), 100);
    }

    #[test]
    fn test_counts() {
        assert_eq!(to_count(13.9), 13);
        assert_eq!(to_count(-2.0), 0);
        assert_eq!(to_count(f64::NAN), 0);
        assert_eq!(to_count(f64::INFINITY), u64::MAX);
        assert_eq!(to_units(3.0), 3);
        assert_eq!(to_units(-1.0), 0);
    }
}
