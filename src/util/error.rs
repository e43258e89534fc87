//! Error types for deskew.

use thiserror::Error;

/// Result alias for deskew operations.
pub type DeskewResult<T> = std::result::Result<T, DeskewError>;

/// Errors that can occur when estimating or correcting skew.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DeskewError {
    /// The raster has a pixel layout this crate does not recognize.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },
    /// The angle range or step cannot produce a candidate set.
    #[error("invalid angle range [{min_deg}, {max_deg}] with step {step_deg}: {reason}")]
    InvalidRange {
        min_deg: f32,
        max_deg: f32,
        step_deg: f32,
        reason: &'static str,
    },
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the declared layout requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// No glyph in the text resolved to a bitmap.
    #[error("no characters found to compose a page")]
    EmptyPage,
    /// Loading or saving an image failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
