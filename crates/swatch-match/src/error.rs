//! Unified error type
//!
//! Each module has its own error enum. [`SwatchError`] wraps all of them
//! so callers mixing parsing, loading and sampling can use `?` throughout.

use std::fmt;

use crate::color::ParseColorError;
use crate::distance::ParseMetricError;
use crate::palette::PaletteError;
use crate::sample::SampleError;

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwatchError {
    /// Malformed hex color
    Color(ParseColorError),
    /// Unknown distance metric name
    Metric(ParseMetricError),
    /// Rejected palette record
    Palette(PaletteError),
    /// Region could not be sampled
    Sample(SampleError),
}

impl fmt::Display for SwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwatchError::Color(e) => write!(f, "invalid color: {}", e),
            SwatchError::Metric(e) => write!(f, "{}", e),
            SwatchError::Palette(e) => write!(f, "invalid palette: {}", e),
            SwatchError::Sample(e) => write!(f, "sampling failed: {}", e),
        }
    }
}

impl std::error::Error for SwatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwatchError::Color(e) => Some(e),
            SwatchError::Metric(e) => Some(e),
            SwatchError::Palette(e) => Some(e),
            SwatchError::Sample(e) => Some(e),
        }
    }
}

impl From<ParseColorError> for SwatchError {
    fn from(e: ParseColorError) -> Self {
        SwatchError::Color(e)
    }
}

impl From<ParseMetricError> for SwatchError {
    fn from(e: ParseMetricError) -> Self {
        SwatchError::Metric(e)
    }
}

impl From<PaletteError> for SwatchError {
    fn from(e: PaletteError) -> Self {
        SwatchError::Palette(e)
    }
}

impl From<SampleError> for SwatchError {
    fn from(e: SampleError) -> Self {
        SwatchError::Sample(e)
    }
}
