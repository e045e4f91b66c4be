//! Blackpoint/whitepoint/lift/gain/multiply/offset stage.
//!
//! Forward: `y = forward_gamma(clamp(A·x + B))`
//! Reverse: `y = clamp(reverse_gamma(x)·A⁻¹ − B·A⁻¹)`
//!
//! The two clamp flags map to different policies per direction, see
//! [`ClampPolicy::forward`] and [`ClampPolicy::reverse`].

use crate::grading::gamma::{forward_gamma, reverse_gamma};
use crate::transform::coefficients::DerivedCoefficients;

/// Slopes at or below this magnitude are not inverted.
pub const MIN_SLOPE: f32 = 1e-6;

/// Which tails of the graded signal are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    #[default]
    None,
    /// `max(x, 0)`
    Floor,
    /// `min(x, 1)`
    Ceiling,
    /// `clamp(x, 0, 1)`
    Both,
}

impl ClampPolicy {
    /// Policy for the forward grade.
    ///
    /// `white_clamp` alone floors at 0 and `black_clamp` alone ceils at 1;
    /// this mirrors the host tool's knob wiring and is kept as is.
    pub fn forward(black_clamp: bool, white_clamp: bool) -> Self {
        match (black_clamp, white_clamp) {
            (false, false) => Self::None,
            (false, true) => Self::Floor,
            (true, false) => Self::Ceiling,
            (true, true) => Self::Both,
        }
    }

    /// Policy for the reverse grade. Only one tail is ever clamped and
    /// `black_clamp` takes precedence.
    pub fn reverse(black_clamp: bool, white_clamp: bool) -> Self {
        if black_clamp {
            Self::Floor
        } else if white_clamp {
            Self::Ceiling
        } else {
            Self::None
        }
    }

    pub fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Self::None => rgb,
            Self::Floor => rgb.map(|v| v.max(0.0)),
            Self::Ceiling => rgb.map(|v| v.min(1.0)),
            Self::Both => rgb.map(|v| v.clamp(0.0, 1.0)),
        }
    }
}

/// `1 / a`, or `1.0` when `|a| <= MIN_SLOPE`.
#[inline]
pub fn safe_reciprocal(a: f32) -> f32 {
    if a.abs() > MIN_SLOPE { 1.0 / a } else { 1.0 }
}

/// `clamp(A·x + B)` per channel.
pub fn forward_linear(x: [f32; 3], a: [f32; 3], b: [f32; 3], clamp: ClampPolicy) -> [f32; 3] {
    let mut lin = [0.0_f32; 3];
    for c in 0..3 {
        lin[c] = a[c] * x[c] + b[c];
    }
    clamp.apply(lin)
}

/// `clamp(x·A⁻¹ − B·A⁻¹)` per channel, with the reciprocal guarded by
/// [`safe_reciprocal`].
pub fn reverse_linear(x: [f32; 3], a: [f32; 3], b: [f32; 3], clamp: ClampPolicy) -> [f32; 3] {
    let mut rev = [0.0_f32; 3];
    for c in 0..3 {
        let inv_a = safe_reciprocal(a[c]);
        let b_rev = -b[c] * inv_a;
        rev[c] = x[c] * inv_a + b_rev;
    }
    clamp.apply(rev)
}

/// Full forward grade of a straight or premultiplied RGB triplet.
pub fn grade_forward(
    x: [f32; 3],
    coeffs: &DerivedCoefficients,
    gamma: [f32; 3],
    clamp: ClampPolicy,
) -> [f32; 3] {
    let lin = forward_linear(x, coeffs.a3(), coeffs.b3(), clamp);
    forward_gamma(lin, gamma, coeffs.inv_gamma3())
}

/// Full reverse grade of a straight or premultiplied RGB triplet.
pub fn grade_reverse(
    x: [f32; 3],
    coeffs: &DerivedCoefficients,
    gamma: [f32; 3],
    clamp: ClampPolicy,
) -> [f32; 3] {
    let rev = reverse_gamma(x, gamma);
    reverse_linear(rev, coeffs.a3(), coeffs.b3(), clamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::params::GradeParams;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_forward_policy_table() {
        assert_eq!(ClampPolicy::forward(false, false), ClampPolicy::None);
        assert_eq!(ClampPolicy::forward(false, true), ClampPolicy::Floor);
        assert_eq!(ClampPolicy::forward(true, false), ClampPolicy::Ceiling);
        assert_eq!(ClampPolicy::forward(true, true), ClampPolicy::Both);
    }

    #[test]
    fn test_reverse_policy_black_wins() {
        assert_eq!(ClampPolicy::reverse(false, false), ClampPolicy::None);
        assert_eq!(ClampPolicy::reverse(true, false), ClampPolicy::Floor);
        assert_eq!(ClampPolicy::reverse(false, true), ClampPolicy::Ceiling);
        assert_eq!(ClampPolicy::reverse(true, true), ClampPolicy::Floor);
    }

    #[test]
    fn test_white_clamp_alone_floors_only() {
        let lin = [-0.5, 1.5, 0.5];
        let out = ClampPolicy::forward(false, true).apply(lin);
        assert_eq!(out, [0.0, 1.5, 0.5]);
    }

    #[test]
    fn test_black_clamp_alone_ceils_only() {
        let out = ClampPolicy::forward(true, false).apply([-0.5, 1.5, 0.5]);
        assert_eq!(out, [-0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_both_clamps_bound_unit_interval() {
        let out = ClampPolicy::forward(true, true).apply([-0.5, 1.5, 0.5]);
        assert_eq!(out, [0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_safe_reciprocal_substitutes_one() {
        assert_eq!(safe_reciprocal(0.0), 1.0);
        assert_eq!(safe_reciprocal(1e-6), 1.0);
        assert_eq!(safe_reciprocal(-1e-7), 1.0);
        assert_eq!(safe_reciprocal(4.0), 0.25);
        assert_eq!(safe_reciprocal(-0.5), -2.0);
    }

    #[test]
    fn test_reverse_linear_undoes_forward() {
        let a = [2.0, 0.5, -1.5];
        let b = [0.1, -0.2, 0.3];
        let x = [0.3, 0.7, -0.4];
        let fwd = forward_linear(x, a, b, ClampPolicy::None);
        let back = reverse_linear(fwd, a, b, ClampPolicy::None);
        for c in 0..3 {
            assert!(
                (back[c] - x[c]).abs() < EPSILON,
                "channel {c}: {:.8} vs {:.8}",
                back[c],
                x[c]
            );
        }
    }

    #[test]
    fn test_reverse_flat_slope_stays_finite() {
        // Zero slope: reciprocal becomes 1, so the result is x − B.
        let out = reverse_linear([0.5, 0.5, 0.5], [0.0; 3], [0.25; 3], ClampPolicy::None);
        assert_eq!(out, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_grade_roundtrip_with_gamma() {
        let params = GradeParams {
            lift: [0.05, 0.0, 0.1, 0.0],
            gain: [1.2, 0.9, 1.1, 1.0],
            gamma: [2.2, 0.8, 1.0, 1.0],
            ..GradeParams::default()
        };
        let coeffs = DerivedCoefficients::derive(&params);
        let gamma = [params.gamma[0], params.gamma[1], params.gamma[2]];
        let x = [0.2, 0.4, 0.6];
        let graded = grade_forward(x, &coeffs, gamma, ClampPolicy::None);
        let back = grade_reverse(graded, &coeffs, gamma, ClampPolicy::None);
        for c in 0..3 {
            assert!(
                (back[c] - x[c]).abs() < 1e-4,
                "channel {c}: {:.8} vs {:.8}",
                back[c],
                x[c]
            );
        }
    }
}
