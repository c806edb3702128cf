//! Score clamping
//!
//! Every scalar the engine produces (metrics, severities, confidences, trust)
//! lives in the closed unit interval and is clamped where it is computed.

/// Clamp a score into `[0.0, 1.0]`.
///
/// `NaN` maps to `0.0` so a malformed upstream number can never leak an
/// unordered value into threshold comparisons.
///
/// ```
/// use vctt_domain::clamp_unit;
///
/// assert_eq!(clamp_unit(1.7), 1.0);
/// assert_eq!(clamp_unit(-0.2), 0.0);
/// assert_eq!(clamp_unit(0.42), 0.42);
/// ```
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nan_is_zero() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_infinities() {
        assert_eq!(clamp_unit(f64::INFINITY), 1.0);
        assert_eq!(clamp_unit(f64::NEG_INFINITY), 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamped_into_unit_interval(value in proptest::num::f64::ANY) {
            let clamped = clamp_unit(value);
            prop_assert!((0.0..=1.0).contains(&clamped));
        }

        #[test]
        fn prop_identity_inside_interval(value in 0.0f64..=1.0) {
            prop_assert_eq!(clamp_unit(value), value);
        }
    }
}
