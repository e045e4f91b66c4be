//! Frame buffers for the beauty, AOV and mask inputs.

use crate::error::GradeError;

/// Row-major RGBA f32 pixels. Colour is premultiplied for beauty and AOV.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, `width × height` entries.
    pub pixels: Vec<[f32; 4]>,
}

impl FrameBuffer {
    /// Wrap pixel data, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, GradeError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GradeError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Check that the pixel data still covers `width × height`. The fields
    /// are public, so a buffer built by hand can disagree with itself.
    pub fn check_len(&self) -> Result<(), GradeError> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(GradeError::SizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// A buffer with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![px; width as usize * height as usize],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Edge-clamped read: coordinates outside the image take the nearest
    /// edge pixel. An empty buffer reads as transparent black.
    pub fn sample_clamped(&self, x: i64, y: i64) -> [f32; 4] {
        if self.is_empty() {
            return [0.0; 4];
        }
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[cy * self.width as usize + cx]
    }

    /// Borrow one row of pixels.
    pub fn row(&self, y: u32) -> &[[f32; 4]] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }
}
