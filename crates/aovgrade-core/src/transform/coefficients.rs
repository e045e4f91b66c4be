//! Linear-stage coefficient derivation.
//!
//! Computed once per parameter set, then read by every pixel:
//! ```text
//! A        = multiply × (gain − lift) / (whitepoint − blackpoint)
//! B        = offset + lift − A × blackpoint
//! invGamma = 1 / gamma
//! ```
//!
//! # Degenerate range
//! A channel with `whitepoint == blackpoint` keeps the IEEE-754 result of
//! the division (`±inf`, or `NaN` when the numerator is zero). Nothing is
//! substituted; the clamp and gamma stages saturate what they can.
//! [`DerivedCoefficients::degenerate_channels`] reports affected channels.

use bytemuck::{Pod, Zeroable};

use crate::transform::params::GradeParams;

/// Slope, intercept and reciprocal gamma, per `[R, G, B, 4th]` channel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DerivedCoefficients {
    pub a: [f32; 4],
    pub b: [f32; 4],
    /// Never consulted for channels with `gamma <= 0`.
    pub inv_gamma: [f32; 4],
}

impl DerivedCoefficients {
    /// Derive coefficients from a parameter set.
    pub fn derive(params: &GradeParams) -> Self {
        let mut a = [0.0_f32; 4];
        let mut b = [0.0_f32; 4];
        let mut inv_gamma = [0.0_f32; 4];

        for c in 0..4 {
            a[c] = params.multiply[c] * (params.gain[c] - params.lift[c])
                / (params.whitepoint[c] - params.blackpoint[c]);
            b[c] = params.offset[c] + params.lift[c] - a[c] * params.blackpoint[c];
            inv_gamma[c] = 1.0 / params.gamma[c];
        }

        let coeffs = Self { a, b, inv_gamma };
        let degenerate = zero_range_channels(params);
        if degenerate.iter().any(|&d| d) {
            tracing::warn!(
                ?degenerate,
                "whitepoint equals blackpoint; slope is non-finite on flagged channels"
            );
        }
        tracing::debug!(a = ?coeffs.a, b = ?coeffs.b, "derived grade coefficients");
        coeffs
    }

    /// RGB slice of the slope.
    #[inline]
    pub fn a3(&self) -> [f32; 3] {
        [self.a[0], self.a[1], self.a[2]]
    }

    /// RGB slice of the intercept.
    #[inline]
    pub fn b3(&self) -> [f32; 3] {
        [self.b[0], self.b[1], self.b[2]]
    }

    /// RGB slice of the reciprocal gamma.
    #[inline]
    pub fn inv_gamma3(&self) -> [f32; 3] {
        [self.inv_gamma[0], self.inv_gamma[1], self.inv_gamma[2]]
    }

    /// Channels whose slope is not finite.
    pub fn degenerate_channels(&self) -> [bool; 4] {
        self.a.map(|a| !a.is_finite())
    }
}

fn zero_range_channels(params: &GradeParams) -> [bool; 4] {
    let mut out = [false; 4];
    for c in 0..4 {
        out[c] = params.whitepoint[c] == params.blackpoint[c];
    }
    out
}
