//! Row colors.
//!
//! Colors are plain RGB triples; conversion to CSS hex is left to the caller
//! so the same value can drive Canvas 2D, a terminal or a native widget.

use serde::{Deserialize, Serialize};

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Calculate relative luminance (0.0 to 1.0).
    /// Uses simplified formula: 0.299*R + 0.587*G + 0.114*B
    pub fn luminance(self) -> f64 {
        let r = f64::from(self.r);
        let g = f64::from(self.g);
        let b = f64::from(self.b);
        (0.299 * r + 0.587 * g + 0.114 * b) / 255.0
    }

    /// Check if this is a light color (luminance > 0.5).
    pub fn is_light(self) -> bool {
        self.luminance() > 0.5
    }

    /// Black or white, whichever reads better on this background.
    pub fn optimal_text_color(self) -> Self {
        if self.is_light() {
            palette::BLACK
        } else {
            palette::WHITE
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fixed row colors.
pub mod palette {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Record that failed to decode. Near-black and distinct from any
    /// marker a user would pick.
    pub const CORRUPTED: Rgb = Rgb::new(1, 2, 3);

    /// Comments, both annotation rows and comments embedded in the log
    pub const COMMENT: Rgb = Rgb::new(0, 255, 0);

    /// Default background of the last completed search match
    pub const SEARCH_RESULT: Rgb = Rgb::new(0x00, 0xAA, 0xFF);

    /// Auto-marked fatal/error records
    pub const AUTO_ERROR: Rgb = Rgb::new(255, 0, 0);

    /// Auto-marked warnings
    pub const AUTO_WARN: Rgb = Rgb::new(255, 255, 0);

    /// Auto-marked marker control responses
    pub const AUTO_MARKER: Rgb = Rgb::new(0, 255, 0);

    /// Default row background, light theme
    pub const LIGHT_BACKGROUND: Rgb = WHITE;

    /// Default row background, dark theme
    pub const DARK_BACKGROUND: Rgb = Rgb::new(31, 31, 31);
}
