//! 8-bit RGB color type and hex string handling

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// A gamma-encoded sRGB color with 8-bit channels.
///
/// This is the representation pixels arrive in and swatches are shown in.
/// The canonical text form is `#RRGGBB` in upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse a hex color string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB` in any case. The
    /// shorthand form doubles each digit (`#F80` is `#FF8800`). Leading and
    /// trailing whitespace is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_match::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#f80").unwrap(), Rgb::new(255, 136, 0));
    /// assert_eq!(Rgb::from_hex("00FF7f").unwrap(), Rgb::new(0, 255, 127));
    /// assert!(Rgb::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let s = hex.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let mut digits = [0u8; 6];
        let mut len = 0;
        for (position, found) in s.chars().enumerate() {
            if position >= 6 {
                return Err(ParseColorError::InvalidLength(s.chars().count()));
            }
            let digit = found
                .to_digit(16)
                .ok_or(ParseColorError::InvalidDigit { position, found })?;
            digits[position] = digit as u8;
            len += 1;
        }

        match len {
            3 => Ok(Self::new(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
            6 => Ok(Self::new(
                digits[0] << 4 | digits[1],
                digits[2] << 4 | digits[3],
                digits[4] << 4 | digits[5],
            )),
            _ => Err(ParseColorError::InvalidLength(len)),
        }
    }

    /// Format as a 7-character, upper-case, `#`-prefixed hex string.
    ///
    /// ```
    /// use swatch_match::Rgb;
    ///
    /// assert_eq!(Rgb::new(10, 171, 255).to_hex(), "#0AABFF");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Round a channel computed in 0.0..=255.0 space and clamp it to a byte.
#[inline]
pub(crate) fn channel_from_f64(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_hex("#000000").unwrap(), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::from_hex("#FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hex("a2834f").unwrap(), Rgb::new(0xA2, 0x83, 0x4F));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!(Rgb::from_hex("#FFF").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_hex("#f00").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hex("ABC").unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_case_insensitive() {
        let upper = Rgb::from_hex("#ABCDEF").unwrap();
        let lower = Rgb::from_hex("#abcdef").unwrap();
        let mixed = Rgb::from_hex("#AbCdEf").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn test_hex_parsing_whitespace() {
        assert_eq!(Rgb::from_hex("  #336699 ").unwrap(), Rgb::new(0x33, 0x66, 0x99));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert_eq!(Rgb::from_hex(""), Err(ParseColorError::InvalidLength(0)));
        assert_eq!(Rgb::from_hex("#"), Err(ParseColorError::InvalidLength(0)));
        assert_eq!(Rgb::from_hex("#FFFF"), Err(ParseColorError::InvalidLength(4)));
        assert_eq!(
            Rgb::from_hex("#FFFFFFF"),
            Err(ParseColorError::InvalidLength(7))
        );
        assert_eq!(
            Rgb::from_hex("#GG0000"),
            Err(ParseColorError::InvalidDigit {
                position: 0,
                found: 'G'
            })
        );
        assert_eq!(
            Rgb::from_hex("#12é"),
            Err(ParseColorError::InvalidDigit {
                position: 2,
                found: 'é'
            })
        );
        // A second '#' is a digit position, not a prefix
        assert!(Rgb::from_hex("##FFF").is_err());
    }

    #[test]
    fn test_to_hex_is_uppercase_and_padded() {
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Rgb::new(0xAB, 0xCD, 0xEF).to_hex(), "#ABCDEF");
        assert_eq!(Rgb::new(0xAB, 0xCD, 0xEF).to_string(), "#ABCDEF");
    }

    /// Every 6-digit hex string survives parse -> format, upper-cased.
    #[test]
    fn test_hex_round_trip_uppercases() {
        for hex in ["#a2834f", "#FE0000", "#00ff7F", "#123abc", "#ffffff"] {
            let rgb = Rgb::from_hex(hex).unwrap();
            assert_eq!(rgb.to_hex(), hex.to_uppercase());
        }
        for v in (0..=255u32).step_by(17) {
            let hex = format!("#{:02x}{:02x}{:02x}", v, 255 - v, (v * 7) % 256);
            assert_eq!(Rgb::from_hex(&hex).unwrap().to_hex(), hex.to_uppercase());
        }
    }

    #[test]
    fn test_channel_from_f64_clamps() {
        assert_eq!(channel_from_f64(-3.2), 0);
        assert_eq!(channel_from_f64(254.5), 255);
        assert_eq!(channel_from_f64(300.0), 255);
        assert_eq!(channel_from_f64(127.49), 127);
    }
}
