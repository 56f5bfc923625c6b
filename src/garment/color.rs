use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{TryOnError, TryOnResult};

/// Opaque base color of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, hex digits are case-insensitive).
    pub fn from_hex(s: &str) -> TryOnResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TryOnError::InvalidColor(s.to_owned()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| TryOnError::InvalidColor(s.to_owned()))
        };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Parse a hex color, treating each missing or malformed channel as zero.
    ///
    /// Used on the render path, where a bad catalog color must not stop the frame.
    pub fn from_hex_lossy(s: &str) -> Self {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| -> u8 {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .unwrap_or(0)
        };
        Self::new(channel(0), channel(2), channel(4))
    }

    /// Scale every channel by `factor`, flooring and clamping to `[0, 255]`.
    ///
    /// This is the only color derivation in the renderer: gradient stops, outlines, highlights
    /// and accents are all produced from the base color through it.
    pub fn adjust(self, factor: f64) -> Self {
        let scale = |c: u8| -> u8 {
            let v = (f64::from(c) * factor).floor();
            if v.is_nan() { 0 } else { v.clamp(0.0, 255.0) as u8 }
        };
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Fully opaque draw color.
    pub fn opaque(self) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, 255)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Convenience wrapper: parse `color` lossily and scale it by `factor`.
pub fn adjust_color(color: &str, factor: f64) -> Rgb8 {
    Rgb8::from_hex_lossy(color).adjust(factor)
}

#[cfg(test)]
#[path = "../../tests/unit/garment/color.rs"]
mod tests;
