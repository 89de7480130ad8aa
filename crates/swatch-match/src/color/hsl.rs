//! HSL and HSV, the slider-friendly cylindrical RGB forms
//!
//! Both store hue in degrees and the other two components as percentages.
//! Components stay in floating point so a value can round-trip through RGB
//! without drifting; call `rounded()` for the integer triple shown to users.

use super::normalize_degrees;
use super::rgb::{channel_from_f64, Rgb};

/// Hue, saturation, lightness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    /// Saturation in percent, `0.0..=100.0`
    pub s: f64,
    /// Lightness in percent, `0.0..=100.0`
    pub l: f64,
}

/// Hue, saturation, value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    /// Saturation in percent, `0.0..=100.0`
    pub s: f64,
    /// Value in percent, `0.0..=100.0`
    pub v: f64,
}

/// Round a hue to whole degrees, folding 360 back onto 0.
#[inline]
fn round_hue(h: f64) -> u16 {
    (h.round() as u16) % 360
}

#[inline]
fn round_percent(p: f64) -> u8 {
    p.round().clamp(0.0, 100.0) as u8
}

impl Hsl {
    /// Create an HSL color. Hue is normalized into `[0, 360)`.
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_degrees(h),
            s,
            l,
        }
    }

    /// Integer `(hue degrees, saturation %, lightness %)` for display.
    ///
    /// ```
    /// use swatch_match::{Hsl, Rgb};
    ///
    /// let hsl = Hsl::from(Rgb::new(255, 128, 0));
    /// assert_eq!(hsl.rounded(), (30, 100, 50));
    /// ```
    pub fn rounded(self) -> (u16, u8, u8) {
        (round_hue(self.h), round_percent(self.s), round_percent(self.l))
    }
}

impl Hsv {
    /// Create an HSV color. Hue is normalized into `[0, 360)`.
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self {
            h: normalize_degrees(h),
            s,
            v,
        }
    }

    /// Integer `(hue degrees, saturation %, value %)` for display.
    pub fn rounded(self) -> (u16, u8, u8) {
        (round_hue(self.h), round_percent(self.s), round_percent(self.v))
    }
}

impl From<Rgb> for Hsl {
    /// Achromatic input (all channels equal) yields hue 0 and saturation 0.
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = normalize_degrees(hsl.h);
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(
            channel_from_f64((r + m) * 255.0),
            channel_from_f64((g + m) * 255.0),
            channel_from_f64((b + m) * 255.0),
        )
    }
}

impl From<Hsl> for Hsv {
    /// Saturation is 0 when the resulting value is 0 (black).
    fn from(hsl: Hsl) -> Self {
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        let v = l + s * l.min(1.0 - l);
        let sv = if v <= 0.0 { 0.0 } else { 2.0 * (v - l) / v };

        Self {
            h: hsl.h,
            s: sv * 100.0,
            v: v * 100.0,
        }
    }
}

impl From<Hsv> for Hsl {
    /// Saturation is 0 when the resulting lightness is 0 or 1, where hue and
    /// saturation carry no information.
    fn from(hsv: Hsv) -> Self {
        let s = hsv.s / 100.0;
        let v = hsv.v / 100.0;

        let l = v * (1.0 - s / 2.0);
        let sl = if l <= 0.0 || l >= 1.0 {
            0.0
        } else {
            (v - l) / l.min(1.0 - l)
        };

        Self {
            h: hsv.h,
            s: sl * 100.0,
            l: l * 100.0,
        }
    }
}

impl From<Rgb> for Hsv {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Hsv::from(Hsl::from(rgb))
    }
}

impl From<Hsv> for Rgb {
    #[inline]
    fn from(hsv: Hsv) -> Self {
        Rgb::from(Hsl::from(hsv))
    }
}
