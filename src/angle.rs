//! Angle utilities used across the detection and geometry stages.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Folds a direction into an orientation in the range (-π/2, π/2].
///
/// A line and its 180°-rotated twin share one orientation, so the fold is
/// modulo π. Already-folded angles are returned unchanged.
#[inline]
pub fn fold_orientation(angle: f64) -> f64 {
    if angle > -FRAC_PI_2 && angle <= FRAC_PI_2 {
        return angle;
    }
    let mut folded = (angle + FRAC_PI_2).rem_euclid(PI) - FRAC_PI_2;
    if folded <= -FRAC_PI_2 {
        folded += PI;
    }
    folded
}

/// Orders arc bounds counter-clockwise: the end is lifted by whole turns until
/// it is not below the start, and the sweep never exceeds a full turn.
#[inline]
pub fn ccw_bounds(start: f64, end: f64) -> (f64, f64) {
    let mut end = end;
    if end < start {
        end += TAU * ((start - end) / TAU).ceil();
    }
    if end - start > TAU {
        end -= TAU * ((end - start) / TAU - 1.0).ceil();
    }
    (start, end)
}

/// Whether `angle` lies inside the counter-clockwise sweep `[start, end]`.
#[inline]
pub fn sweep_contains(start: f64, end: f64, angle: f64) -> bool {
    let offset = (angle - start).rem_euclid(TAU);
    offset <= end - start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fold_orientation_basic() {
        assert!(approx_eq(fold_orientation(0.3), 0.3));
        assert!(approx_eq(fold_orientation(PI), 0.0));
        assert!(approx_eq(fold_orientation(-PI + 0.1), 0.1));
        assert!(approx_eq(fold_orientation(3.0 * FRAC_PI_2 - 0.2), FRAC_PI_2 - 0.2));
        assert!(approx_eq(fold_orientation(FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(fold_orientation(-FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(fold_orientation(7.0 * PI + 0.25), 0.25));
    }

    #[test]
    fn fold_orientation_is_idempotent() {
        let mut a = -10.0f64;
        while a < 10.0 {
            let once = fold_orientation(a);
            assert!(once > -FRAC_PI_2 && once <= FRAC_PI_2, "a={a} once={once}");
            assert_eq!(fold_orientation(once), once);
            a += 0.137;
        }
    }

    #[test]
    fn ccw_bounds_wraps_end() {
        let (s, e) = ccw_bounds(170f64.to_radians(), 10f64.to_radians());
        assert!(approx_eq(s, 170f64.to_radians()));
        assert!(approx_eq(e, 370f64.to_radians()));

        let (s, e) = ccw_bounds(0.0, 5.0 * PI);
        assert!(approx_eq(s, 0.0));
        assert!(e - s <= TAU + 1e-12);
    }

    #[test]
    fn sweep_contains_handles_wrap() {
        let s = 170f64.to_radians();
        let e = 370f64.to_radians();
        assert!(sweep_contains(s, e, 200f64.to_radians()));
        assert!(sweep_contains(s, e, (-160f64).to_radians()));
        assert!(!sweep_contains(s, e, 90f64.to_radians()));
    }
}
