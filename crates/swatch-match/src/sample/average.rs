//! Circular-mean averaging of a pixel region

use crate::color::{normalize_degrees, Lab, Lch, Rgb};

use super::buffer::PixelSource;
use super::error::SampleError;
use super::rect::SampleRect;

/// Running sums for averaging colors in Lch.
///
/// Lightness and chroma are summed directly. Hue is summed as a unit
/// vector `(cos h, sin h)` so that 358° and 2° average to 0°, not 180°.
///
/// Accumulation is order-independent, so a region may be split across
/// workers and the partial sums combined with [`merge`](Self::merge).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LchAccumulator {
    sum_l: f64,
    sum_c: f64,
    sum_cos: f64,
    sum_sin: f64,
    count: usize,
}

impl LchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, lch: Lch) {
        let h = lch.h.to_radians();
        self.sum_l += lch.l;
        self.sum_c += lch.c;
        self.sum_cos += h.cos();
        self.sum_sin += h.sin();
        self.count += 1;
    }

    #[inline]
    pub fn add_rgb(&mut self, rgb: Rgb) {
        self.add(Lch::from(Lab::from(rgb)));
    }

    /// Fold another accumulator's sums into this one.
    pub fn merge(&mut self, other: &LchAccumulator) {
        self.sum_l += other.sum_l;
        self.sum_c += other.sum_c;
        self.sum_cos += other.sum_cos;
        self.sum_sin += other.sum_sin;
        self.count += other.count;
    }

    /// Number of colors added so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The mean color, or `None` if nothing was added.
    pub fn mean(&self) -> Option<Lch> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let h = self.sum_sin.atan2(self.sum_cos).to_degrees();
        Some(Lch::new(self.sum_l / n, self.sum_c / n, normalize_degrees(h)))
    }

    /// The mean color in every representation the caller may display.
    pub fn finish(&self) -> Option<SampleResult> {
        let lch = self.mean()?;
        let lab = Lab::from(lch);
        let rgb = Rgb::from(lab);
        Some(SampleResult {
            rgb,
            hex: rgb.to_hex(),
            lab,
            lch,
            pixel_count: self.count,
        })
    }
}

/// The representative color of a sampled region.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub rgb: Rgb,
    /// `#RRGGBB`, upper case
    pub hex: String,
    /// Unrounded mean in Lab, the value to match against a palette
    pub lab: Lab,
    pub lch: Lch,
    /// Number of pixels that contributed
    pub pixel_count: usize,
}

/// Average the pixels of `rect` into one representative color.
///
/// Pixels are visited row by row. Parts of the rectangle that hang over
/// the buffer edge are skipped, as are pixels the source reports as
/// ineligible.
///
/// # Errors
///
/// - [`SampleError::EmptyRegion`] if `rect` has zero area or holds no
///   eligible pixel
/// - [`SampleError::OutOfBounds`] if `rect` does not overlap the buffer
pub fn average_color<S>(source: &S, rect: SampleRect) -> Result<SampleResult, SampleError>
where
    S: PixelSource + ?Sized,
{
    if rect.is_empty() {
        return Err(SampleError::EmptyRegion);
    }

    let (width, height) = (source.width(), source.height());
    if rect.left >= width || rect.top >= height {
        return Err(SampleError::OutOfBounds {
            rect,
            width,
            height,
        });
    }

    let mut acc = LchAccumulator::new();
    for y in rect.top..rect.bottom().min(height) {
        for x in rect.left..rect.right().min(width) {
            if let Some(rgb) = source.pixel(x, y) {
                acc.add_rgb(rgb);
            }
        }
    }

    acc.finish().ok_or(SampleError::EmptyRegion)
}
