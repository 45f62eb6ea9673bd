//! Angle utilities shared by the line fitter and the merger.
use std::f32::consts::{PI, TAU};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Normalizes an angle into the range [0, 2π).
#[inline]
pub fn normalize_two_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(TAU);
    if norm >= TAU - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs();
    if diff > PI {
        diff = diff.rem_euclid(PI);
    }
    if diff > std::f32::consts::FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Shortest signed rotation taking `from` onto the undirected orientation
/// `to`, in (−π/2, π/2].
#[inline]
pub fn signed_half_pi_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(PI);
    if delta > std::f32::consts::FRAC_PI_2 {
        delta -= PI;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(normalize_half_pi(-FRAC_PI_4), 3.0 * FRAC_PI_4));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
    }

    #[test]
    fn normalize_two_pi_wraps_negative() {
        assert!(approx_eq(normalize_two_pi(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(approx_eq(normalize_two_pi(TAU), 0.0));
        assert!(approx_eq(normalize_two_pi(1.0), 1.0));
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(
            angular_difference(FRAC_PI_4, -FRAC_PI_4),
            FRAC_PI_2
        ));
        assert!(approx_eq(
            angular_difference(0.01, PI - 0.01),
            0.02
        ));
    }

    #[test]
    fn signed_delta_takes_short_way_round() {
        assert!(approx_eq(signed_half_pi_delta(0.1, 0.3), 0.2));
        assert!(approx_eq(signed_half_pi_delta(0.05, PI - 0.05), -0.1));
        assert!(approx_eq(signed_half_pi_delta(PI - 0.05, 0.05), 0.1));
    }
}
