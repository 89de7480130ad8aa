//! Error type for region sampling

use std::fmt;

use super::rect::SampleRect;

/// Why a region could not be averaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The rectangle has zero area or contains no eligible pixel
    EmptyRegion,
    /// The rectangle lies entirely outside the buffer
    OutOfBounds {
        /// The requested rectangle
        rect: SampleRect,
        /// Buffer width in pixels
        width: usize,
        /// Buffer height in pixels
        height: usize,
    },
    /// The byte slice does not match `width * height * bytes_per_pixel`
    BufferSize {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::EmptyRegion => write!(f, "sample region contains no pixels"),
            SampleError::OutOfBounds {
                rect,
                width,
                height,
            } => write!(
                f,
                "sample rectangle {}x{} at ({}, {}) lies outside the {}x{} buffer",
                rect.width, rect.height, rect.left, rect.top, width, height
            ),
            SampleError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for SampleError {}
