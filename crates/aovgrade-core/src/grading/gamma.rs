//! Piecewise gamma curves with a linear tail above 1.
//!
//! # Forward
//! ```text
//!   G <= 0 :  x < 0 → 0,   0 <= x <= 1 → x,   x > 1 → 1e30
//!   G == 1 :  x
//!   else   :  x < 0 → x,   0 <= x < 1 → x^(1/G),   x >= 1 → 1 + (x − 1)/G
//! ```
//!
//! # Reverse
//! ```text
//!   G <= 0 :  x > 0 → 1,   x <= 0 → 0
//!   G == 1 :  x
//!   else   :  x <= 0 → x,  0 < x < 1 → x^G,   x >= 1 → 1 + (x − 1)·G
//! ```
//!
//! The two directions treat `x == 0` with different comparisons. Both
//! conventions are kept exactly as written above.

/// Output of the degenerate forward curve for inputs above 1.
pub const GAMMA_WHITE_SENTINEL: f32 = 1e30;

/// Apply the forward gamma curve to an RGB triplet.
///
/// `inv_gamma` must hold `1 / gamma` for every channel with `gamma > 0`.
pub fn forward_gamma(x: [f32; 3], gamma: [f32; 3], inv_gamma: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        let xi = x[c];
        let g = gamma[c];

        out[c] = if g <= 0.0 {
            if xi < 0.0 {
                0.0
            } else if xi > 1.0 {
                GAMMA_WHITE_SENTINEL
            } else {
                xi
            }
        } else if g != 1.0 {
            let ig = inv_gamma[c];
            if xi < 0.0 {
                xi
            } else if xi < 1.0 {
                xi.powf(ig)
            } else {
                1.0 + (xi - 1.0) * ig
            }
        } else {
            xi
        };
    }
    out
}

/// Undo [`forward_gamma`] on an RGB triplet.
pub fn reverse_gamma(x: [f32; 3], gamma: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        let xi = x[c];
        let g = gamma[c];

        out[c] = if g <= 0.0 {
            if xi > 0.0 { 1.0 } else { 0.0 }
        } else if g != 1.0 {
            if xi <= 0.0 {
                xi
            } else if xi < 1.0 {
                xi.powf(g)
            } else {
                1.0 + (xi - 1.0) * g
            }
        } else {
            xi
        };
    }
    out
}
