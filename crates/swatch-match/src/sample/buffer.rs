//! Borrowed pixel buffers

use crate::color::Rgb;

use super::error::SampleError;

/// Read access to a grid of pixels.
///
/// `pixel` returns `None` for coordinates outside the grid and for pixels
/// that should not contribute to an average (fully transparent ones).
pub trait PixelSource {
    /// Grid width in pixels.
    fn width(&self) -> usize;
    /// Grid height in pixels.
    fn height(&self) -> usize;
    /// Color at column `x`, row `y`, if it is eligible for sampling.
    fn pixel(&self, x: usize, y: usize) -> Option<Rgb>;
}

fn expected_len(width: usize, height: usize, stride: usize) -> usize {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(stride))
        .unwrap_or(usize::MAX)
}

/// Row-major RGBA8 pixels, as read back from a canvas.
///
/// Pixels with alpha 0 are ineligible. Any other alpha counts the color as
/// fully present.
#[derive(Debug, Clone, Copy)]
pub struct RgbaBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbaBuffer<'a> {
    /// Wrap `data`, which must hold exactly `width * height * 4` bytes.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, SampleError> {
        let expected = expected_len(width, height, 4);
        if data.len() != expected {
            return Err(SampleError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

impl PixelSource for RgbaBuffer<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let px = &self.data[i..i + 4];
        if px[3] == 0 {
            return None;
        }
        Some(Rgb::new(px[0], px[1], px[2]))
    }
}

/// Row-major RGB8 pixels with no alpha channel.
#[derive(Debug, Clone, Copy)]
pub struct RgbBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbBuffer<'a> {
    /// Wrap `data`, which must hold exactly `width * height * 3` bytes.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, SampleError> {
        let expected = expected_len(width, height, 3);
        if data.len() != expected {
            return Err(SampleError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

impl PixelSource for RgbBuffer<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_rejects_wrong_length() {
        let err = RgbaBuffer::new(&[0u8; 7], 2, 1).unwrap_err();
        assert_eq!(
            err,
            SampleError::BufferSize {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_rgb_rejects_wrong_length() {
        assert!(RgbBuffer::new(&[0u8; 12], 2, 2).is_ok());
        assert!(RgbBuffer::new(&[0u8; 13], 2, 2).is_err());
    }

    #[test]
    fn test_rgba_pixel_access() {
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 255,   4, 5, 6, 0,
            7, 8, 9, 1,     10, 11, 12, 128,
        ];
        let buf = RgbaBuffer::new(&data, 2, 2).unwrap();
        assert_eq!(buf.pixel(0, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(buf.pixel(1, 0), None, "alpha 0 is ineligible");
        assert_eq!(buf.pixel(0, 1), Some(Rgb::new(7, 8, 9)));
        assert_eq!(buf.pixel(1, 1), Some(Rgb::new(10, 11, 12)));
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
    }

    #[test]
    fn test_rgb_pixel_access() {
        let data = [1, 2, 3, 4, 5, 6];
        let buf = RgbBuffer::new(&data, 2, 1).unwrap();
        assert_eq!(buf.pixel(1, 0), Some(Rgb::new(4, 5, 6)));
        assert_eq!(buf.pixel(0, 1), None);
    }

    #[test]
    fn test_zero_sized_buffer() {
        let buf = RgbaBuffer::new(&[], 0, 0).unwrap();
        assert_eq!(buf.width(), 0);
        assert_eq!(buf.pixel(0, 0), None);
    }
}
