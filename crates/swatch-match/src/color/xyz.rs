//! CIE XYZ (D65) and the sRGB transfer function
//!
//! XYZ only ever exists between RGB and Lab. Y is scaled so that the
//! reference white has Y = 100.

use super::rgb::{channel_from_f64, Rgb};

/// D65 reference white X.
pub(crate) const REF_X: f64 = 95.047;
/// D65 reference white Y.
pub(crate) const REF_Y: f64 = 100.000;
/// D65 reference white Z.
pub(crate) const REF_Z: f64 = 108.883;

/// A color in CIE 1931 XYZ space relative to the D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    /// X tristimulus (0.0..=95.047 for in-gamut sRGB)
    pub x: f64,
    /// Y tristimulus / luminance (0.0..=100.0)
    pub y: f64,
    /// Z tristimulus (0.0..=108.883 for in-gamut sRGB)
    pub z: f64,
}

impl Xyz {
    /// Create a new XYZ color.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// sRGB decode: gamma-encoded 0.0..=1.0 to linear light.
#[inline]
fn decode(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// sRGB encode: linear light to gamma-encoded 0.0..=1.0.
#[inline]
fn encode(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

impl From<Rgb> for Xyz {
    /// Gamma-decode the channels, then apply the sRGB → XYZ matrix (×100).
    fn from(rgb: Rgb) -> Self {
        let r = decode(rgb.r as f64 / 255.0) * 100.0;
        let g = decode(rgb.g as f64 / 255.0) * 100.0;
        let b = decode(rgb.b as f64 / 255.0) * 100.0;

        Self {
            x: r * 0.4124 + g * 0.3576 + b * 0.1805,
            y: r * 0.2126 + g * 0.7152 + b * 0.0722,
            z: r * 0.0193 + g * 0.1192 + b * 0.9505,
        }
    }
}

impl From<Xyz> for Rgb {
    /// Inverse matrix, gamma re-encode, then round and clamp each channel.
    ///
    /// XYZ values outside the sRGB gamut clamp to the nearest channel
    /// bound rather than wrapping.
    fn from(xyz: Xyz) -> Self {
        let x = xyz.x / 100.0;
        let y = xyz.y / 100.0;
        let z = xyz.z / 100.0;

        let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
        let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
        let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

        Rgb::new(
            channel_from_f64(encode(r) * 255.0),
            channel_from_f64(encode(g) * 255.0),
            channel_from_f64(encode(b) * 255.0),
        )
    }
}
