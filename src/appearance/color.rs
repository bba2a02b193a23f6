use serde::{Deserialize, Serialize};

use crate::foundation::error::{DrapeError, DrapeResult};

/// Opaque sRGB color parsed from a `#RRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Parse exactly six hex digits, with or without a leading `#` (case-insensitive).
    pub fn parse_hex(s: &str) -> DrapeResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DrapeError::invalid_color(s));
        }

        let byte = |i: usize| -> DrapeResult<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| DrapeError::invalid_color(s))
        };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
        })
    }

    /// Perceptual luminance `0.299R + 0.587G + 0.114B` on normalized channels.
    pub fn brightness(self) -> f64 {
        let n = |c: u8| f64::from(c) / 255.0;
        (0.299 * n(self.r) + 0.587 * n(self.g) + 0.114 * n(self.b)).clamp(0.0, 1.0)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Perceptual brightness in `[0, 1]` of a `#RRGGBB` color string.
pub fn brightness(hex_color: &str) -> DrapeResult<f64> {
    Ok(Rgb8::parse_hex(hex_color)?.brightness())
}

#[cfg(test)]
#[path = "../../tests/unit/appearance/color.rs"]
mod tests;
