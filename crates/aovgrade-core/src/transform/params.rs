//! Central parameter struct for the AOV grade.
//!
//! `GradeParams` holds every knob of the grade. It is immutable for the
//! duration of a frame; any change goes through `GradeTransform::set_params`
//! so the derived coefficients are rebuilt.

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::grading::linear::ClampPolicy;
use crate::grading::premult::PremultMode;

/// Whether the grade is applied or undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Linear stage, clamp, then gamma.
    Forward,
    /// Reverse gamma, inverse linear stage, then clamp.
    Reverse,
}

/// Code path selected once per parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeMode {
    pub direction: Direction,
    pub premult: PremultMode,
    pub clamp: ClampPolicy,
    pub view_aov: bool,
    pub use_mask: bool,
}

/// Every grade knob. Vectors are `[R, G, B, 4th]`; only RGB is graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeParams {
    /// Input value mapped to `lift`. Default: `[0, 0, 0, 0]`.
    pub blackpoint: [f32; 4],
    /// Input value mapped to `gain`. Default: `[1, 1, 1, 1]`.
    pub whitepoint: [f32; 4],
    /// Output black level. Default: `[0, 0, 0, 0]`.
    pub lift: [f32; 4],
    /// Output white level. Default: `[1, 1, 1, 1]`.
    pub gain: [f32; 4],
    /// Slope multiplier. Default: `[1, 1, 1, 1]`.
    pub multiply: [f32; 4],
    /// Additive offset. Default: `[0, 0, 0, 0]`.
    pub offset: [f32; 4],
    /// Gamma exponent; `<= 0` selects the degenerate curve. Default: `[1, 1, 1, 1]`.
    pub gamma: [f32; 4],

    pub black_clamp: bool,
    pub white_clamp: bool,
    /// Output the graded AOV alone instead of compositing it back.
    #[serde(alias = "viewaov")]
    pub view_aov: bool,
    pub reverse: bool,
    /// Grade straight colour (AOV divided by beauty alpha).
    pub unpremult: bool,
    /// Blend between original and graded. Clamped to `[0, 1]` during use.
    pub mix: f32,
    #[serde(alias = "useMask")]
    pub use_mask: bool,
}

impl Default for GradeParams {
    /// Produces the identity grade.
    fn default() -> Self {
        Self {
            blackpoint: [0.0; 4],
            whitepoint: [1.0; 4],
            lift: [0.0; 4],
            gain: [1.0; 4],
            multiply: [1.0; 4],
            offset: [0.0; 4],
            gamma: [1.0; 4],
            black_clamp: false,
            white_clamp: false,
            view_aov: false,
            reverse: false,
            unpremult: false,
            mix: 1.0,
            use_mask: false,
        }
    }
}

impl GradeParams {
    /// Parse parameters from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, GradeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GradeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the boolean flags into the code path used for every pixel.
    pub fn mode(&self) -> GradeMode {
        let (direction, clamp) = if self.reverse {
            (
                Direction::Reverse,
                ClampPolicy::reverse(self.black_clamp, self.white_clamp),
            )
        } else {
            (
                Direction::Forward,
                ClampPolicy::forward(self.black_clamp, self.white_clamp),
            )
        };

        GradeMode {
            direction,
            premult: if self.unpremult {
                PremultMode::Unpremult
            } else {
                PremultMode::Direct
            },
            clamp,
            view_aov: self.view_aov,
            use_mask: self.use_mask,
        }
    }
}
