#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! swatch-match: perceptual color sampling and palette matching
//!
//! This library turns sampled pixels into a representative color and ranks
//! a reference palette of labeled swatches by perceptual distance to it.
//!
//! # Quick Start
//!
//! ```
//! use swatch_match::{find_closest, Lab, MatchQuery, Palette, PaletteEntry, Rgb};
//!
//! let palette = Palette::from_entries(vec![
//!     PaletteEntry::parse("red_wool", "#FE0000", ["block"]).unwrap(),
//!     PaletteEntry::parse("lime_wool", "#00FF00", ["block"]).unwrap(),
//!     PaletteEntry::parse("blue_wool", "#0000FF", ["block"]).unwrap(),
//! ]);
//!
//! let target = Lab::from("#FF0000".parse::<Rgb>().unwrap());
//! let matches = find_closest(target, &palette, &MatchQuery::new().count(1));
//!
//! assert_eq!(matches[0].entry.id(), "red_wool");
//! ```
//!
//! # Sampling a Region
//!
//! ```
//! use swatch_match::{average_color, RgbaBuffer, SampleRect};
//!
//! // 2x1 image, both pixels opaque orange
//! let bytes = [255, 128, 0, 255, 255, 128, 0, 255];
//! let buffer = RgbaBuffer::new(&bytes, 2, 1).unwrap();
//!
//! let sample = average_color(&buffer, SampleRect::new(0, 0, 2, 1)).unwrap();
//! assert_eq!(sample.hex, "#FF8000");
//! assert_eq!(sample.pixel_count, 2);
//! ```
//!
//! # Color Spaces
//!
//! | Type | Range | Used For |
//! |------|-------|----------|
//! | [`Rgb`] | 8-bit channels | Input pixels, hex strings, output swatches |
//! | [`Hsl`] / [`Hsv`] | degrees, percent | Human-facing display and slider editing |
//! | [`Xyz`] | D65, Y in 0..=100 | Intermediate only |
//! | [`Lab`] | L 0..=100 | Perceptual distance |
//! | [`Lch`] | L, chroma, hue degrees | Averaging samples (hue is circular) |
//!
//! Conversions are `From` impls; chain them through [`Lab`] to move
//! between RGB and the cylindrical spaces.
//!
//! # Distance
//!
//! Palette ranking uses CIEDE2000 ([`delta_e_2000`]) by default. The plain
//! RGB Euclidean distance is available through [`DistanceMetric::RgbEuclidean`]
//! for callers that need the cheaper, less accurate ordering.
//!
//! # Averaging
//!
//! Hue is an angle, so averaging raw hue values breaks near 0/360 degrees
//! (358 and 2 average to 180, a complementary color). The sampler averages
//! the hue as the direction of the summed unit vectors instead; see
//! [`average_color`].

pub mod color;
pub mod distance;
pub mod error;
pub mod palette;
pub mod sample;


pub use color::{Hsl, Hsv, Lab, Lch, ParseColorError, Rgb, Xyz};
pub use distance::{delta_e_2000, rgb_distance, DistanceMetric, ParseMetricError};
pub use error::SwatchError;
pub use palette::{
    find_closest, find_split, EntryRecord, FilterMode, LoadReport, MatchQuery, MatchResult, Palette,
    PaletteEntry, PaletteError, SplitMatches, SplitQuery, Tag, TagFilters, DEFAULT_MATCH_COUNT,
};
pub use sample::{
    average_color, LchAccumulator, PixelSource, RgbBuffer, RgbaBuffer, SampleError, SampleRect,
    SampleResult, DEFAULT_POINTER_SIZE, MIN_SELECTION_AREA,
};
