//! Color distance functions
//!
//! [`delta_e_2000`] is the perceptual metric used for ranking. The RGB
//! Euclidean distance is kept for callers that want the cheap ordering;
//! [`DistanceMetric`] selects between them.

mod ciede2000;

use std::fmt;
use std::str::FromStr;

use crate::color::{Lab, Rgb};

pub use ciede2000::delta_e_2000;

/// Euclidean distance between two colors on their 8-bit channels.
///
/// Ranges from 0.0 to `255 * sqrt(3)` (about 441.7).
pub fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Distance metric used to rank palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    /// CIEDE2000 on Lab coordinates.
    #[default]
    Ciede2000,
    /// Straight-line distance between RGB channel values. Fast, but blue
    /// and green differences dominate and dark colors crowd together.
    RgbEuclidean,
}

impl DistanceMetric {
    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Ciede2000 => "ciede2000",
            DistanceMetric::RgbEuclidean => "rgb",
        }
    }

    /// Distance between two colors under this metric.
    ///
    /// Each side carries both representations so palette entries can use
    /// their precomputed Lab without converting again.
    #[inline]
    pub fn between(self, a: (Lab, Rgb), b: (Lab, Rgb)) -> f64 {
        match self {
            DistanceMetric::Ciede2000 => delta_e_2000(a.0, b.0),
            DistanceMetric::RgbEuclidean => rgb_distance(a.1, b.1),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a metric name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError(pub String);

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown distance metric {:?} (expected \"ciede2000\" or \"rgb\")",
            self.0
        )
    }
}

impl std::error::Error for ParseMetricError {}

impl FromStr for DistanceMetric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ciede2000" | "de2000" | "delta-e-2000" => Ok(DistanceMetric::Ciede2000),
            "rgb" | "rgb-euclidean" | "euclidean" => Ok(DistanceMetric::RgbEuclidean),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}
