//! Region sampling
//!
//! Turns a rectangle of pixels into one representative color. The pixel
//! data stays with the caller; [`PixelSource`] is the only view the
//! sampler needs.

mod average;
mod buffer;
mod error;
mod rect;

pub use average::{average_color, LchAccumulator, SampleResult};
pub use buffer::{PixelSource, RgbBuffer, RgbaBuffer};
pub use error::SampleError;
pub use rect::{SampleRect, DEFAULT_POINTER_SIZE, MIN_SELECTION_AREA};
