//! Frame driver — fans the per-pixel grade out over whole images.
//!
//! Coefficients are derived once in [`GradeTransform::new`]; rows are then
//! evaluated in parallel with Rayon, each worker reading the transform by
//! shared reference.
//!
//! # Example
//!
//! ```rust
//! use aovgrade_core::frame::grade_frame;
//! use aovgrade_core::image::FrameBuffer;
//! use aovgrade_core::{GradeParams, GradeTransform};
//!
//! let beauty = FrameBuffer::filled(4, 4, [0.5, 0.5, 0.5, 1.0]);
//! let aov = FrameBuffer::filled(4, 4, [0.25, 0.25, 0.25, 1.0]);
//! let transform = GradeTransform::new(GradeParams::default());
//! let out = grade_frame(&transform, &beauty, &aov, None).unwrap();
//! assert_eq!(out.pixels[0], [0.5, 0.5, 0.5, 1.0]);
//! ```

use rayon::prelude::*;

use crate::error::GradeError;
use crate::image::FrameBuffer;
use crate::transform::evaluate::GradeTransform;

/// Grade same-length pixel slices into `out`.
///
/// `mask`, when given, must be the same length as `beauty`.
pub fn evaluate_batch(
    transform: &GradeTransform,
    beauty: &[[f32; 4]],
    aov: &[[f32; 4]],
    mask: Option<&[[f32; 4]]>,
    out: &mut [[f32; 4]],
) -> Result<(), GradeError> {
    let expected = beauty.len();
    for len in [aov.len(), out.len()]
        .into_iter()
        .chain(mask.map(<[[f32; 4]]>::len))
    {
        if len != expected {
            return Err(GradeError::SizeMismatch { expected, actual: len });
        }
    }

    match mask {
        Some(mask) => {
            for (i, dst) in out.iter_mut().enumerate() {
                *dst = transform.evaluate(beauty[i], aov[i], Some(mask[i]));
            }
        }
        None => {
            for (i, dst) in out.iter_mut().enumerate() {
                *dst = transform.evaluate(beauty[i], aov[i], None);
            }
        }
    }
    Ok(())
}

/// Grade a whole frame.
///
/// The output takes the beauty's extent. The AOV and mask are read with
/// edge-clamped addressing, so inputs of a different size are stretched
/// at their borders rather than rejected. A buffer whose pixel count does
/// not match its own dimensions is rejected with [`GradeError::SizeMismatch`].
pub fn grade_frame(
    transform: &GradeTransform,
    beauty: &FrameBuffer,
    aov: &FrameBuffer,
    mask: Option<&FrameBuffer>,
) -> Result<FrameBuffer, GradeError> {
    beauty.check_len()?;
    aov.check_len()?;
    if let Some(mask) = mask {
        mask.check_len()?;
    }
    if beauty.is_empty() {
        return Err(GradeError::EmptyImage);
    }
    let (width, height) = beauty.dimensions();
    tracing::debug!(width, height, mode = ?transform.mode(), "grading frame");

    let mut out = FrameBuffer::filled(width, height, [0.0; 4]);
    let same_aov = aov.dimensions() == beauty.dimensions();
    let same_mask = mask.is_none_or(|m| m.dimensions() == beauty.dimensions());

    out.pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .try_for_each(|(y, dst_row)| {
            let y32 = y as u32;
            let beauty_row = beauty.row(y32);

            if same_aov && same_mask {
                return evaluate_batch(
                    transform,
                    beauty_row,
                    aov.row(y32),
                    mask.map(|m| m.row(y32)),
                    dst_row,
                );
            }

            for (x, dst) in dst_row.iter_mut().enumerate() {
                let (sx, sy) = (x as i64, y as i64);
                let aov_px = aov.sample_clamped(sx, sy);
                let mask_px = mask.map(|m| m.sample_clamped(sx, sy));
                *dst = transform.evaluate(beauty_row[x], aov_px, mask_px);
            }
            Ok(())
        })?;

    Ok(out)
}
