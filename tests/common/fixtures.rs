//! Test fixtures and constants.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Entries in the embedded palette
pub const EMBEDDED_PALETTE_LEN: u64 = 49;

/// Colors of embedded palette entries
pub mod colors {
    pub const STONE: &str = "#7D7D7D";
    pub const OAK_PLANKS: &str = "#A2834F";
    /// Shared by white_wool and white_carpet
    pub const WHITE_WOOL: &str = "#E9ECEC";
    /// Shared by red_wool and red_carpet
    pub const RED_WOOL: [u8; 3] = [0xA1, 0x27, 0x22];
    pub const BLACK_WOOL: [u8; 3] = [0x14, 0x15, 0x19];
    pub const WHITE: [u8; 3] = [0xE9, 0xEC, 0xEC];
}

/// A small palette file for reload tests
pub const SMALL_PALETTE: &str = r##"[
  {"id": "stone", "hex": "#7d7d7d", "tags": ["block"]},
  {"id": "glass", "hex": "#b0d6db"}
]"##;

/// RGBA buffer filled with one opaque color
pub fn solid_rgba(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    data
}

/// RGBA buffer whose left half is `left` and right half is `right`
pub fn split_rgba(width: usize, height: usize, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let rgb = if x < width / 2 { left } else { right };
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    data
}

/// Base64 as expected in the `data` field of sample requests
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}
