//! Hex color parsing shared by themes, settings and marking files.
//!
//! Colors travel as `#RRGGBB` strings in TOML and JSON and as
//! [`egui::Color32`] everywhere else.

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when a color string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Hex color must be 3, 6 or 8 characters: {0}")]
    InvalidLength(String),
    #[error("Invalid hex color: {0}")]
    InvalidDigits(String),
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
pub fn hex_to_color(hex: &str) -> Result<Color32, ColorParseError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigits(trimmed.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorParseError::InvalidDigits(trimmed.to_string()))
    };

    match digits.len() {
        3 => {
            // #abc expands to #aabbcc
            let short = |idx: usize| channel(idx..idx + 1).map(|v| v * 17);
            Ok(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        6 => Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(ColorParseError::InvalidLength(trimmed.to_string())),
    }
}

/// Convert Color32 to hex string for display and persistence.
pub fn color_to_hex(color: Color32) -> String {
    if color.a() == u8::MAX {
        format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
    } else {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// A [`Color32`] that (de)serializes as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub Color32);

impl From<HexColor> for Color32 {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl From<Color32> for HexColor {
    fn from(value: Color32) -> Self {
        Self(value)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color_to_hex(self.0))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        hex_to_color(&raw)
            .map(HexColor)
            .map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional hex color, dropping values that do not parse.
///
/// Marking files may carry colors written for other renderers (named CSS
/// colors, `rgba(..)`); those fall back to the theme default instead of
/// rejecting the whole file.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<HexColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match hex_to_color(&raw) {
        Ok(color) => Some(HexColor(color)),
        Err(e) => {
            log::warn!("Ignoring marking color: {}", e);
            None
        }
    }))
}
