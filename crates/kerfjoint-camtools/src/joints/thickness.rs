//! Projected material thickness for angled joints.

use std::f64::consts::FRAC_PI_2;

/// Thickness of the stock measured along a joint cut at `angle` (radians).
///
/// Below a right angle the mitre correction `t·tan(π/2−a) + t/cos(π/2−a)`
/// applies; at and above it the thickness is `t·sin(a)`.
pub fn effective_thickness(thickness: f64, angle: f64) -> f64 {
    if angle < FRAC_PI_2 {
        let complement = FRAC_PI_2 - angle;
        thickness * complement.tan() + thickness / complement.cos()
    } else {
        thickness * angle.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_right_angle_is_raw_thickness() {
        assert_eq!(effective_thickness(3.0, FRAC_PI_2), 3.0);
    }

    #[test]
    fn test_forty_five_degrees() {
        let t = effective_thickness(3.0, FRAC_PI_4);
        assert!((t - (3.0 + 3.0 * std::f64::consts::SQRT_2)).abs() < 1e-9);
    }

    #[test]
    fn test_obtuse_uses_sine() {
        let angle = 2.0;
        assert!((effective_thickness(4.0, angle) - 4.0 * angle.sin()).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_approaches_raw_thickness_near_right_angle(t in 0.5f64..20.0, d in 1e-9f64..1e-6) {
            let below = effective_thickness(t, FRAC_PI_2 - d);
            let above = effective_thickness(t, FRAC_PI_2 + d);
            prop_assert!((below - t).abs() < 1e-4 * t.max(1.0));
            prop_assert!((above - t).abs() < 1e-4 * t.max(1.0));
        }

        #[test]
        fn prop_acute_is_never_thinner(t in 0.5f64..20.0, angle in 0.1f64..FRAC_PI_2) {
            prop_assert!(effective_thickness(t, angle) >= t - 1e-9);
        }
    }
}
