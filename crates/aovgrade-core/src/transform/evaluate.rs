//! Core transform evaluation — grades one AOV sample and composites it back.

use crate::grading::composite::{apply_mix, blend_factor, composite_back, is_noop, mask_alpha};
use crate::grading::linear::{grade_forward, grade_reverse};
use crate::transform::coefficients::DerivedCoefficients;
use crate::transform::params::{Direction, GradeMode, GradeParams};

/// A parameter set with its coefficients derived up front.
///
/// Immutable during evaluation and shared by reference across workers.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTransform {
    params: GradeParams,
    coeffs: DerivedCoefficients,
    mode: GradeMode,
}

impl GradeTransform {
    pub fn new(params: GradeParams) -> Self {
        let coeffs = DerivedCoefficients::derive(&params);
        let mode = params.mode();
        Self { params, coeffs, mode }
    }

    pub fn params(&self) -> &GradeParams {
        &self.params
    }

    pub fn coefficients(&self) -> &DerivedCoefficients {
        &self.coeffs
    }

    pub fn mode(&self) -> GradeMode {
        self.mode
    }

    /// Replace the parameters and re-derive the coefficients.
    pub fn set_params(&mut self, params: GradeParams) {
        *self = Self::new(params);
    }

    /// Grade one pixel.
    ///
    /// `beauty` and `aov` are premultiplied RGBA; only the alpha of `mask`
    /// is read, and only when masking is enabled.
    pub fn evaluate(&self, beauty: [f32; 4], aov: [f32; 4], mask: Option<[f32; 4]>) -> [f32; 4] {
        evaluate_with(beauty, aov, mask, &self.params, &self.coeffs, self.mode)
    }
}

impl Default for GradeTransform {
    fn default() -> Self {
        Self::new(GradeParams::default())
    }
}

/// Grade one pixel from separately held parameters and coefficients.
///
/// `coeffs` must have been derived from `params`.
pub fn evaluate_pixel(
    beauty: [f32; 4],
    aov: [f32; 4],
    mask: Option<[f32; 4]>,
    params: &GradeParams,
    coeffs: &DerivedCoefficients,
) -> [f32; 4] {
    evaluate_with(beauty, aov, mask, params, coeffs, params.mode())
}

fn evaluate_with(
    beauty: [f32; 4],
    aov: [f32; 4],
    mask: Option<[f32; 4]>,
    params: &GradeParams,
    coeffs: &DerivedCoefficients,
    mode: GradeMode,
) -> [f32; 4] {
    let m_alpha = mask_alpha(mask, mode.use_mask);

    // Nothing reaches the output: the AOV goes back unchanged.
    if is_noop(m_alpha, params.mix) {
        return composite_back(beauty, aov, aov, mode.view_aov);
    }

    let gamma = [params.gamma[0], params.gamma[1], params.gamma[2]];
    let input = mode.premult.split(aov, beauty[3]);
    let graded = match mode.direction {
        Direction::Forward => grade_forward(input.rgb, coeffs, gamma, mode.clamp),
        Direction::Reverse => grade_reverse(input.rgb, coeffs, gamma, mode.clamp),
    };
    let (original_pm, graded_pm) = mode.premult.rejoin(aov, &input, graded);

    let t = blend_factor(m_alpha, params.mix);
    let masked = apply_mix(original_pm, graded_pm, t);
    composite_back(beauty, aov, masked, mode.view_aov)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_grade_returns_beauty() {
        let transform = GradeTransform::default();
        let beauty = [0.75, 0.5, 1.0, 1.0];
        let aov = [0.25, 0.125, 0.5, 0.625];
        assert_eq!(transform.evaluate(beauty, aov, None), beauty);
    }

    #[test]
    fn test_gain_adds_to_beauty() {
        let transform = GradeTransform::new(GradeParams {
            gain: [2.0, 2.0, 2.0, 1.0],
            ..GradeParams::default()
        });
        let beauty = [0.75, 0.5, 1.0, 1.0];
        let aov = [0.25, 0.125, 0.5, 1.0];
        let out = transform.evaluate(beauty, aov, None);
        assert_eq!(out, [1.0, 0.625, 1.5, 1.0]);
    }

    #[test]
    fn test_zero_mix_takes_noop_path() {
        let transform = GradeTransform::new(GradeParams {
            gain: [4.0; 4],
            mix: 0.0,
            view_aov: true,
            ..GradeParams::default()
        });
        let out = transform.evaluate([0.5, 0.5, 0.5, 0.75], [0.1, 0.2, 0.3, 0.4], None);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.75]);
    }

    #[test]
    fn test_half_mix_blends() {
        let transform = GradeTransform::new(GradeParams {
            gain: [3.0; 4],
            mix: 0.5,
            view_aov: true,
            ..GradeParams::default()
        });
        let out = transform.evaluate([1.0; 4], [0.25, 0.5, 0.0, 1.0], None);
        let expected = [0.5, 1.0, 0.0, 1.0];
        for c in 0..4 {
            assert!((out[c] - expected[c]).abs() < EPSILON, "channel {c}: {}", out[c]);
        }
    }

    #[test]
    fn test_unpremult_grades_straight_colour() {
        // Offset in straight space is scaled by beauty alpha once premultiplied.
        let transform = GradeTransform::new(GradeParams {
            offset: [0.2, 0.2, 0.2, 0.0],
            unpremult: true,
            view_aov: true,
            ..GradeParams::default()
        });
        let out = transform.evaluate([0.0, 0.0, 0.0, 0.5], [0.25, 0.125, 0.0, 0.5], None);
        let expected = [0.35, 0.225, 0.1, 0.5];
        for c in 0..4 {
            assert!((out[c] - expected[c]).abs() < EPSILON, "channel {c}: {}", out[c]);
        }
    }

    #[test]
    fn test_reverse_undoes_forward_grade() {
        let params = GradeParams {
            lift: [0.05; 4],
            gain: [1.5; 4],
            gamma: [1.8; 4],
            view_aov: true,
            ..GradeParams::default()
        };
        let forward = GradeTransform::new(params.clone());
        let reverse = GradeTransform::new(GradeParams { reverse: true, ..params });

        let aov = [0.2, 0.4, 0.05, 1.0];
        let graded = forward.evaluate([0.0, 0.0, 0.0, 1.0], aov, None);
        let back = reverse.evaluate([0.0, 0.0, 0.0, 1.0], graded, None);
        for c in 0..3 {
            assert!((back[c] - aov[c]).abs() < 1e-4, "channel {c}: {}", back[c]);
        }
    }

    #[test]
    fn test_evaluate_pixel_matches_transform() {
        let params = GradeParams {
            multiply: [1.3, 0.7, 1.0, 1.0],
            gamma: [0.9, 1.1, 2.0, 1.0],
            unpremult: true,
            mix: 0.8,
            ..GradeParams::default()
        };
        let transform = GradeTransform::new(params.clone());
        let coeffs = DerivedCoefficients::derive(&params);
        let beauty = [0.6, 0.5, 0.4, 0.9];
        let aov = [0.3, 0.2, 0.1, 0.9];
        assert_eq!(
            evaluate_pixel(beauty, aov, None, &params, &coeffs),
            transform.evaluate(beauty, aov, None)
        );
    }

    #[test]
    fn test_set_params_rederives() {
        let mut transform = GradeTransform::default();
        transform.set_params(GradeParams {
            gain: [2.0; 4],
            ..GradeParams::default()
        });
        assert_eq!(transform.coefficients().a, [2.0; 4]);
        assert_eq!(transform.params().gain, [2.0; 4]);
    }
}
