//! Premultiplied-alpha handling around the grade.
//!
//! In [`PremultMode::Unpremult`] the AOV is divided by the *beauty* alpha,
//! graded as straight colour, then both the original and graded colours are
//! multiplied back by the beauty alpha. In [`PremultMode::Direct`] the
//! premultiplied AOV is graded as is and keeps its own alpha.

/// Beauty alpha is floored to this before dividing.
pub const UNPREMULT_ALPHA_FLOOR: f32 = 1e-8;

/// How the AOV's RGB is presented to the grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PremultMode {
    Unpremult,
    #[default]
    Direct,
}

/// Colour handed to the grade plus the context needed to return to
/// premultiplied space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeInput {
    /// RGB to grade.
    pub rgb: [f32; 3],
    /// Alpha attached to the original and graded intermediates.
    pub alpha: f32,
    /// Factor that returns the intermediates to premultiplied space.
    pub premult: f32,
}

impl PremultMode {
    /// Prepare an AOV sample for grading.
    pub fn split(self, aov: [f32; 4], beauty_alpha: f32) -> GradeInput {
        match self {
            Self::Unpremult => {
                let inv_alpha = 1.0 / beauty_alpha.max(UNPREMULT_ALPHA_FLOOR);
                let straight = aov.map(|v| v * inv_alpha);
                GradeInput {
                    rgb: [straight[0], straight[1], straight[2]],
                    alpha: straight[3],
                    premult: beauty_alpha,
                }
            }
            Self::Direct => GradeInput {
                rgb: [aov[0], aov[1], aov[2]],
                alpha: aov[3],
                premult: 1.0,
            },
        }
    }

    /// Build the `(original, graded)` premultiplied pair from the graded RGB.
    pub fn rejoin(self, aov: [f32; 4], input: &GradeInput, graded: [f32; 3]) -> ([f32; 4], [f32; 4]) {
        match self {
            Self::Unpremult => {
                let original = premultiply(input.rgb, input.alpha, input.premult);
                let graded = premultiply(graded, input.alpha, input.premult);
                (original, graded)
            }
            Self::Direct => (aov, [graded[0], graded[1], graded[2], aov[3]]),
        }
    }
}

#[inline]
fn premultiply(rgb: [f32; 3], alpha: f32, by: f32) -> [f32; 4] {
    [rgb[0] * by, rgb[1] * by, rgb[2] * by, alpha * by]
}
