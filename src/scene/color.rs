//! Named and hex colours used by shapes and the canvas background.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a colour name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("unknown colour: {0}")]
    Unknown(String),
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const BROWN: Color = Color::rgb(102, 51, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Accepts "red", "yellow", "blue", "green", "magenta", "cyan", "brown",
/// "white", "black" (any case) or `#rrggbb`.
impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| ColorError::Unknown(s.to_string()));
        }

        match name.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::RED),
            "black" => Ok(Self::BLACK),
            "blue" => Ok(Self::BLUE),
            "yellow" => Ok(Self::YELLOW),
            "green" => Ok(Self::GREEN),
            "magenta" => Ok(Self::MAGENTA),
            "cyan" => Ok(Self::CYAN),
            "brown" => Ok(Self::BROWN),
            "white" => Ok(Self::WHITE),
            _ => Err(ColorError::Unknown(s.to_string())),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
