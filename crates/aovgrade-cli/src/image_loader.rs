//! Image loading and saving for the command-line driver.

use std::path::Path;

use aovgrade_core::image::FrameBuffer;
use image::{DynamicImage, Rgba32FImage};

/// Load an image from disk as premultiplied RGBA f32.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, TIFF, EXR).
/// Pixel values are taken as stored; no transfer function is removed.
pub fn load_image(path: &Path) -> Result<FrameBuffer, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    let rgba = img.to_rgba32f();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<[f32; 4]> = bytemuck::cast_slice(rgba.as_raw().as_slice()).to_vec();

    FrameBuffer::new(width, height, pixels).map_err(|_| ImageLoadError::Layout { width, height })
}

/// Save a frame. Float formats (EXR, TIFF) keep full precision; 8/16-bit
/// formats are quantized by the encoder.
pub fn save_image(path: &Path, frame: &FrameBuffer) -> Result<(), ImageLoadError> {
    let raw: Vec<f32> = bytemuck::cast_slice(frame.pixels.as_slice()).to_vec();
    let buffer = Rgba32FImage::from_raw(frame.width, frame.height, raw).ok_or(
        ImageLoadError::Layout {
            width: frame.width,
            height: frame.height,
        },
    )?;

    let dynamic = DynamicImage::ImageRgba32F(buffer);
    let saved = match OutputEncoding::for_path(path) {
        OutputEncoding::Float => dynamic.save(path),
        OutputEncoding::Rgba16 => dynamic.to_rgba16().save(path),
        OutputEncoding::Rgb8 => dynamic.to_rgb8().save(path),
        OutputEncoding::Rgba8 => dynamic.to_rgba8().save(path),
    };
    saved.map_err(ImageLoadError::Encode)
}

/// Pixel layout handed to the encoder, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputEncoding {
    Float,
    Rgba16,
    /// JPEG has no alpha channel; the encoder rejects RGBA input.
    Rgb8,
    Rgba8,
}

impl OutputEncoding {
    fn for_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("exr" | "tif" | "tiff") => Self::Float,
            Some("png") => Self::Rgba16,
            Some("jpg" | "jpeg") => Self::Rgb8,
            _ => Self::Rgba8,
        }
    }
}

/// Errors that can occur during image loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("pixel buffer does not match {width}x{height}")]
    Layout { width: u32, height: u32 },
}
