//! Color types and conversions
//!
//! Every color space is its own type and conversions are `From` impls, so
//! a Lab value can never be handed to code expecting RGB by accident.
//!
//! # Example
//!
//! ```
//! use swatch_match::{Lab, Lch, Rgb};
//!
//! let rgb: Rgb = "#3A7BD5".parse().unwrap();
//! let lab = Lab::from(rgb);
//! let lch = Lch::from(lab);
//!
//! // Back through the cylindrical form to RGB
//! let back = Rgb::from(Lab::from(lch));
//! assert!((back.r as i32 - rgb.r as i32).abs() <= 1);
//! ```

mod error;
mod hsl;
mod lab;
mod rgb;
mod xyz;

pub use error::ParseColorError;
pub use hsl::{Hsl, Hsv};
pub use lab::{Lab, Lch};
pub use rgb::Rgb;
pub use xyz::Xyz;

/// Bring an angle in degrees into `[0, 360)`.
#[inline]
pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    let h = deg.rem_euclid(360.0);
    // rem_euclid can land exactly on 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_degrees;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-17) < 360.0);
    }
}
