//! Color value parsing for table configuration.
//!
//! Supports:
//!
//! - Named colors: `red`, `green`, `blue`, etc. (8 ANSI colors, plus `gray`/`grey`)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - 256-color palette: `"0"` through `"255"`
//! - RGB hex: `"#ffba08"` or `"#fff"` (3 or 6 digit)
//!
//! # Example
//!
//! ```rust
//! use textgrid::style::ColorDef;
//!
//! let amber = ColorDef::parse_string("#FFBA08").unwrap();
//! let red = ColorDef::parse_string("red").unwrap();
//! let orange = ColorDef::parse_string("208").unwrap();
//! assert!(ColorDef::parse_string("purple").is_err());
//! # let _ = (amber, red, orange);
//! ```

use console::Color;

use crate::error::TableError;
use crate::util::rgb_to_ansi256;

/// Parsed color definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    /// Named ANSI color.
    Named(Color),
    /// 256-color palette index.
    Color256(u8),
    /// RGB color, quantized to the 256-color palette on output.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color from a string value.
    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse::<u8>()
                .map(ColorDef::Color256)
                .map_err(|_| format!("Color palette index {} out of range (0-255)", s));
        }

        Self::parse_named(s)
    }

    /// Parses a configured color, reporting failures as [`TableError::InvalidColor`].
    pub fn parse_config(s: &str) -> Result<Self, TableError> {
        Self::parse_string(s).map_err(|reason| TableError::InvalidColor {
            value: s.to_string(),
            reason,
        })
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        let invalid = || format!("Invalid hex: {}", hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(ColorDef::Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(ColorDef::Rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let name_lower = name.to_lowercase();

        if let Some(base) = name_lower.strip_prefix("bright_") {
            return Self::parse_bright_color(base);
        }

        let color = match name_lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "gray" | "grey" => Color::White,
            _ => return Err(format!("Unknown color name: {}", name)),
        };

        Ok(ColorDef::Named(color))
    }

    fn parse_bright_color(base: &str) -> Result<Self, String> {
        // console exposes bright colors as palette indices 8-15
        let index = match base {
            "black" => 8,
            "red" => 9,
            "green" => 10,
            "yellow" => 11,
            "blue" => 12,
            "magenta" => 13,
            "cyan" => 14,
            "white" => 15,
            _ => return Err(format!("Unknown bright color: bright_{}", base)),
        };

        Ok(ColorDef::Color256(index))
    }

    /// Converts this color definition to a `console::Color`.
    pub fn to_console_color(&self) -> Color {
        match self {
            ColorDef::Named(c) => *c,
            ColorDef::Color256(n) => Color::Color256(*n),
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((*r, *g, *b))),
        }
    }
}

/// Parses an optional configured color straight to a console color.
pub(crate) fn parse_optional(s: Option<&str>) -> Result<Option<Color>, TableError> {
    match s {
        Some(s) if !s.trim().is_empty() => Ok(Some(ColorDef::parse_config(s)?.to_console_color())),
        _ => Ok(None),
    }
}
