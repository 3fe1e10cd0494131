//! Error types for boxparse.

use thiserror::Error;

/// Result alias for boxparse operations.
pub type BoxParseResult<T> = std::result::Result<T, BoxParseError>;

/// Errors that can occur when parsing model outputs.
///
/// Every variant signals a programming or configuration defect (wrong shapes,
/// mismatched metadata); none of them is retryable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoxParseError {
    /// A size has a zero width or height.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// The tensor buffer is shorter than its declared shape requires.
    #[error("tensor buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The detection tensor channel count does not match the configured
    /// class vocabulary (and prototype channel count, for segmentation).
    #[error("output tensor has {got} channels, expected {expected}")]
    ChannelLayoutMismatch { expected: usize, got: usize },
    /// The per-box mask weight vector length differs from the prototype
    /// tensor channel count. Signals a model/metadata contract violation.
    #[error("mask weight vector has {weights} entries, prototype tensor has {channels} channels")]
    MaskChannelMismatch { channels: usize, weights: usize },
}
