//! RGBA colors and their fixed-width hex encoding.
//!
//! Colors are stored as `RRGGBB` (or `RRGGBBAA` when not fully opaque), each
//! pair being a channel quantized to 0–255.

use serde::{Deserialize, Serialize};

/// Color with channel intensities and opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl ColorRgba {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Fully opaque color.
    pub const fn opaque(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Quantized 0–255 channels, for terminals and other 8-bit consumers.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (quantize(self.red), quantize(self.green), quantize(self.blue))
    }

    /// Encode as uppercase hex. Opacity is only written when it does not
    /// round to 255, so opaque colors always produce six digits.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        let a = quantize(self.alpha);
        if a == u8::MAX {
            format!("{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    /// Decode `RRGGBB` or `RRGGBBAA`, optionally prefixed with `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorFormatError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorFormatError::InvalidDigit(bad));
        }
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorFormatError::InvalidLength(digits.len()));
        }

        // All characters are ASCII hex digits here, so byte slicing is safe.
        let channel = |i: usize| -> Result<f64, ColorFormatError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| ColorFormatError::InvalidLength(digits.len()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl Default for ColorRgba {
    fn default() -> Self {
        Self::opaque(1.0, 1.0, 1.0)
    }
}

fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A hex string that does not describe a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorFormatError {
    /// Digit count other than 6 or 8.
    InvalidLength(usize),
    /// A character that is not a hex digit.
    InvalidDigit(char),
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength(n) => {
                write!(f, "invalid color format: expected 6 or 8 hex digits, got {}", n)
            }
            Self::InvalidDigit(c) => write!(f, "invalid color format: {:?} is not a hex digit", c),
        }
    }
}

impl std::error::Error for ColorFormatError {}
