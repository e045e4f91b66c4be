//! Masking, mix and compositing the graded AOV back into the beauty.
//!
//! ```text
//! t      = clamp(mask_alpha × mix, 0, 1)
//! masked = t >= 1 ? graded : lerp(original, graded, t)
//! out    = view_aov ? masked : beauty − aov + masked
//! out.a  = beauty.a
//! ```
//!
//! Compositing back is additive: the beauty is assumed to be the sum of its
//! AOVs, so removing the old AOV and adding the graded one is exact.

/// Mask influence: the mask's alpha when masking is enabled, else `1.0`.
///
/// A missing mask sample with masking enabled reads as fully on.
#[inline]
pub fn mask_alpha(mask: Option<[f32; 4]>, use_mask: bool) -> f32 {
    match mask {
        Some(px) if use_mask => px[3],
        _ => 1.0,
    }
}

/// True when nothing of the grade can reach the output.
#[inline]
pub fn is_noop(mask_alpha: f32, mix: f32) -> bool {
    mix <= 0.0 || mask_alpha <= 0.0
}

/// Blend weight between original and graded.
#[inline]
#[allow(clippy::manual_clamp)]
pub fn blend_factor(mask_alpha: f32, mix: f32) -> f32 {
    // NaN weight reads as 0.
    (mask_alpha * mix).max(0.0).min(1.0)
}

/// Component-wise `a + (b − a)·t`.
#[inline]
pub fn lerp4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let mut out = [0.0_f32; 4];
    for c in 0..4 {
        out[c] = a[c] + (b[c] - a[c]) * t;
    }
    out
}

/// Apply the blend weight. `t >= 1` returns `graded` without interpolating.
#[inline]
pub fn apply_mix(original: [f32; 4], graded: [f32; 4], t: f32) -> [f32; 4] {
    if t >= 1.0 { graded } else { lerp4(original, graded, t) }
}

/// Put the masked AOV back into the beauty, or show it alone.
///
/// The output alpha is always the beauty alpha. With `view_aov` the masked
/// AOV is returned without the `beauty − beauty` term, so a non-finite beauty
/// colour does not turn the viewed AOV into NaN.
#[inline]
pub fn composite_back(beauty: [f32; 4], aov: [f32; 4], masked: [f32; 4], view_aov: bool) -> [f32; 4] {
    let mut out = masked;
    if !view_aov {
        for c in 0..4 {
            out[c] = beauty[c] - aov[c] + masked[c];
        }
    }
    out[3] = beauty[3];
    out
}
