//! Color model and dominant-color extraction

pub mod extract;

pub use extract::{extract, extract_from_path, ExtractorConfig, ExtractorStrategy};

use serde::{Deserialize, Serialize};

/// Normalized RGBA color, each channel in [0, 1]
///
/// Never mutated after construction; derived values like the hex string are
/// recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` string (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgba8(r, g, b, 255))
    }

    /// Copy with a replaced alpha channel
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Rounded 0-255 projection of all four channels
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#rrggbb` serialization; alpha is not included
    pub fn hex_string(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        let rgb = (r as u32) << 16 | (g as u32) << 8 | b as u32;
        format!("#{rgb:06x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_string_red() {
        assert_eq!(Color::new(1.0, 0.0, 0.0, 1.0).hex_string(), "#ff0000");
    }

    #[test]
    fn test_hex_string_black() {
        assert_eq!(Color::new(0.0, 0.0, 0.0, 1.0).hex_string(), "#000000");
    }

    #[test]
    fn test_hex_string_ignores_alpha() {
        assert_eq!(Color::new(0.0, 1.0, 0.0, 0.25).hex_string(), "#00ff00");
    }

    #[test]
    fn test_hex_roundtrip() {
        let color = Color::from_hex("#8a2be2").unwrap();
        assert_eq!(color.hex_string(), "#8a2be2");
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("not-hex").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
    }

    #[test]
    fn test_rgba8_projection_rounds() {
        let color = Color::new(0.5, 0.0, 1.0, 1.0);
        assert_eq!(color.to_rgba8(), [128, 0, 255, 255]);
    }
}
