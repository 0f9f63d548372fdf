//! Styling adapter.
//!
//! Layout code produces plain text fragments whose widths are already
//! settled. A [`Decoration`] wraps one such fragment in ANSI codes through
//! `console::Style`; the visible characters are never altered, so
//! stripping the codes gives back exactly the laid-out text.
//!
//! Decorations are composed per fragment rather than nested, because an
//! inner reset code would otherwise clear the outer background.

mod color;

pub use color::ColorDef;
pub(crate) use color::parse_optional;

use console::{Color, Style};

/// Decoration applied to one measured text fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
}

impl Decoration {
    /// A decoration that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// A decoration with only a background.
    pub fn background(bg: Option<Color>) -> Self {
        Decoration {
            bg,
            ..Self::default()
        }
    }

    /// A decoration with only a foreground.
    pub fn foreground(fg: Option<Color>) -> Self {
        Decoration {
            fg,
            ..Self::default()
        }
    }

    /// Returns `true` if applying this decoration leaves text untouched.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold && !self.italic && !self.underline
    }

    /// Builds the equivalent `console::Style`, with styling forced on.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new().force_styling(true);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.bold();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        style
    }

    /// Wraps `text` and appends it to `out`.
    ///
    /// Empty fragments and plain decorations are appended verbatim.
    pub fn paint_into(&self, out: &mut String, text: &str) {
        if text.is_empty() || self.is_plain() {
            out.push_str(text);
        } else {
            out.push_str(&self.to_style().apply_to(text).to_string());
        }
    }

    /// Wraps `text` in a new string.
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.paint_into(&mut out, text);
        out
    }
}
