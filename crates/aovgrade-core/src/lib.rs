//! AOV Grade Core — domain layer for grading a single render pass.
//!
//! This crate contains the grade math (linear remap, piecewise gamma,
//! premultiplication handling, mask/mix and composite-back), the per-pixel
//! transform, and a parallel frame driver. No file I/O.

pub mod error;
pub mod frame;
pub mod grading;
pub mod image;
pub mod transform;

// Re-exports for convenience.
pub use error::GradeError;
pub use frame::{evaluate_batch, grade_frame};
pub use image::FrameBuffer;
pub use transform::coefficients::DerivedCoefficients;
pub use transform::evaluate::{GradeTransform, evaluate_pixel};
pub use transform::params::{Direction, GradeMode, GradeParams};
