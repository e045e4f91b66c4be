//! Error types for the frame driver and parameter loading.
//!
//! The per-pixel path never fails; degenerate numeric input is absorbed by
//! fixed substitution rules inside the grading stages.

/// Errors raised outside the per-pixel path.
#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("image has zero width or height")]
    EmptyImage,
    #[error("invalid grade parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),
}
