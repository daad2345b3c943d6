//! The fixed drawing palette.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque cell color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Drawing colors, in swatch order.
pub const PALETTE: [Rgb; 30] = [
    Rgb::new(0x9B, 0x87, 0xF5),
    Rgb::new(0xD9, 0x46, 0xEF),
    Rgb::new(0x0E, 0xA5, 0xE9),
    Rgb::new(0xF9, 0x73, 0x16),
    Rgb::new(0x10, 0xB9, 0x81),
    Rgb::new(0xEF, 0x44, 0x44),
    Rgb::new(0x8B, 0x5C, 0xF6),
    Rgb::new(0xEC, 0x48, 0x99),
    Rgb::new(0x06, 0xB6, 0xD4),
    Rgb::new(0xF5, 0x9E, 0x0B),
    Rgb::new(0x14, 0xB8, 0xA6),
    Rgb::new(0xDC, 0x26, 0x26),
    Rgb::new(0x7C, 0x3A, 0xED),
    Rgb::new(0xDB, 0x27, 0x77),
    Rgb::new(0x02, 0x84, 0xC7),
    Rgb::new(0xEA, 0x58, 0x0C),
    Rgb::new(0x05, 0x96, 0x69),
    Rgb::new(0xB9, 0x1C, 0x1C),
    Rgb::new(0x6D, 0x28, 0xD9),
    Rgb::new(0xBE, 0x18, 0x5D),
    Rgb::new(0x03, 0x69, 0xA1),
    Rgb::new(0xC2, 0x41, 0x0C),
    Rgb::new(0x04, 0x78, 0x57),
    Rgb::new(0x99, 0x1B, 0x1B),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xE5, 0xE7, 0xEB),
    Rgb::new(0x9C, 0xA3, 0xAF),
    Rgb::new(0x6B, 0x72, 0x80),
    Rgb::new(0x37, 0x41, 0x51),
    Rgb::new(0x1F, 0x29, 0x37),
];

/// Selected when an editor is created.
pub const DEFAULT_COLOR: Rgb = PALETTE[0];

/// Whether `color` is one of the palette swatches.
pub fn in_palette(color: Rgb) -> bool {
    PALETTE.contains(&color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#9b87f5"), Some(Rgb::new(0x9B, 0x87, 0xF5)));
        assert_eq!(Rgb::from_hex("FFFFFF"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("#FFF"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
        assert_eq!(Rgb::from_hex("#+f+f+f"), None);
        assert_eq!(Rgb::from_hex("-1-1-1"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(DEFAULT_COLOR.to_hex(), "#9B87F5");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_palette_is_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b, "{a} appears twice");
            }
        }
    }

    #[test]
    fn test_serde_as_hex_string() {
        assert_eq!(serde_json::to_string(&DEFAULT_COLOR).unwrap(), "\"#9B87F5\"");
        let c: Rgb = serde_json::from_str("\"#0ea5e9\"").unwrap();
        assert_eq!(c, PALETTE[2]);
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
