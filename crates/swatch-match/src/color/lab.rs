//! CIE L*a*b* and its cylindrical form L*C*h
//!
//! Lab is where perceptual distance is measured. Lch is the same space in
//! polar coordinates; the sampler averages there because chroma and hue
//! can be treated separately (hue as an angle).

use super::normalize_degrees;
use super::rgb::Rgb;
use super::xyz::{Xyz, REF_X, REF_Y, REF_Z};

/// Threshold between the cube-root and linear segments of the Lab function.
const EPSILON: f64 = 0.008856;
/// Slope of the linear segment.
const KAPPA_SLOPE: f64 = 7.787;
/// Offset of the linear segment.
const OFFSET: f64 = 16.0 / 116.0;

/// A color in CIE 1976 L*a*b* space (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green (negative) to red (positive), roughly -128..=127
/// - `b`: Blue (negative) to yellow (positive), roughly -128..=127
///
/// Values are not clamped; averaged or hand-written colors may lie
/// outside the sRGB gamut and clamp only when converted back to [`Rgb`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness: 0.0..=100.0
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Components as `[L, a, b]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

impl From<[f64; 3]> for Lab {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        t * KAPPA_SLOPE + OFFSET
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    let cubed = t * t * t;
    if cubed > EPSILON {
        cubed
    } else {
        (t - OFFSET) / KAPPA_SLOPE
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / REF_X);
        let fy = lab_f(xyz.y / REF_Y);
        let fz = lab_f(xyz.z / REF_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = lab.a / 500.0 + fy;
        let fz = fy - lab.b / 200.0;

        Xyz::new(
            lab_f_inv(fx) * REF_X,
            lab_f_inv(fy) * REF_Y,
            lab_f_inv(fz) * REF_Z,
        )
    }
}

impl From<Rgb> for Lab {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Lab::from(Xyz::from(rgb))
    }
}

impl From<Lab> for Rgb {
    /// Convert back to 8-bit sRGB, clamping out-of-gamut channels.
    #[inline]
    fn from(lab: Lab) -> Self {
        Rgb::from(Xyz::from(lab))
    }
}

/// Lab in cylindrical coordinates: lightness, chroma, hue.
///
/// # Components
///
/// - `l`: Lightness, identical to [`Lab::l`]
/// - `c`: Chroma, `sqrt(a² + b²)`, 0.0 for neutral greys
/// - `h`: Hue angle in degrees, `[0, 360)`
///
/// For neutral colors the hue is undefined; the conversion yields 0.0,
/// which is harmless because it is multiplied by zero chroma on the way
/// back to Lab.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lch {
    /// Lightness: 0.0..=100.0
    pub l: f64,
    /// Chroma: distance from the neutral axis
    pub c: f64,
    /// Hue angle in degrees, `[0, 360)`
    pub h: f64,
}

impl Lch {
    /// Create a new Lch color. The hue is normalized into `[0, 360)`.
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h: normalize_degrees(h),
        }
    }
}

impl From<Lab> for Lch {
    fn from(lab: Lab) -> Self {
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let h = normalize_degrees(lab.b.atan2(lab.a).to_degrees());
        Self { l: lab.l, c, h }
    }
}

impl From<Lch> for Lab {
    fn from(lch: Lch) -> Self {
        let h = lch.h.to_radians();
        Self::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
    }
}
