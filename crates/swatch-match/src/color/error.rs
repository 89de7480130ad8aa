//! Error type for hex color parsing.

use std::fmt;

/// Error type for parsing hex color strings.
///
/// Returned when a hex color string has the wrong number of digits or
/// contains a character that is not a hexadecimal digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Digit count after stripping `#` is neither 3 nor 6 (carries the count)
    InvalidLength(usize),
    /// Non-hexadecimal character at the given digit position
    InvalidDigit {
        /// Zero-based position among the digits (after the `#`)
        position: usize,
        /// The offending character
        found: char,
    },
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(len) => write!(
                f,
                "invalid hex color length {} (expected 3 or 6 digits)",
                len
            ),
            ParseColorError::InvalidDigit { position, found } => {
                write!(f, "invalid hex digit {:?} at position {}", found, position)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}
