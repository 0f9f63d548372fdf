//! Line composition: borders, header, body and accumulation lines.
//!
//! A [`Decorator`] holds the settled column widths and the resolved
//! configuration and turns already-stringified cell texts into finished
//! output lines. Cells are padded and wrapped by [`super::cell`]; this
//! module places the border glyphs and applies a [`Decoration`] to each
//! fragment. Styling never changes the visible characters, so the stripped
//! output of a styled render equals the output of a plain render.
//!
//! # Example
//!
//! ```rust
//! use textgrid::tabular::{BorderStyle, Decorator};
//! use textgrid::TableConfig;
//!
//! let config = TableConfig::from_yaml("border: { style: ascii }")
//!     .unwrap()
//!     .resolve()
//!     .unwrap()
//!     .plain();
//! let deco = Decorator::new(&config, &[2, 4]);
//!
//! assert_eq!(deco.header_lines(&["id", "name"]), vec!["|  id  |  name  |"]);
//! assert_eq!(deco.table_width(), 17);
//! assert_eq!(BorderStyle::Ascii.vertical(), Some('|'));
//! ```

use console::Color;
use serde::{Deserialize, Serialize};

use crate::config::ResolvedConfig;
use crate::style::Decoration;
use crate::util::{repeat_char, text_width};

use super::cell::{line_cells, wrap_row, CellContent};
use super::types::Align;

/// Border glyph preset.
///
/// A preset only supplies the glyphs that are not configured explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No borders.
    #[default]
    None,
    /// ASCII borders: `-`, `|`
    Ascii,
    /// Light box-drawing characters: `─`, `│`
    Light,
    /// Heavy box-drawing characters: `━`, `┃`
    Heavy,
    /// Double-line box-drawing characters: `═`, `║`
    Double,
    /// Light lines, as drawn by rounded-corner tables: `─`, `│`
    Rounded,
}

impl BorderStyle {
    /// Glyph of the horizontal line drawn between row groups.
    pub fn horizontal(self) -> Option<char> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Ascii => Some('-'),
            BorderStyle::Light | BorderStyle::Rounded => Some('─'),
            BorderStyle::Heavy => Some('━'),
            BorderStyle::Double => Some('═'),
        }
    }

    /// Glyph drawn before the first column and after every column.
    pub fn vertical(self) -> Option<char> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Ascii => Some('|'),
            BorderStyle::Light | BorderStyle::Rounded => Some('│'),
            BorderStyle::Heavy => Some('┃'),
            BorderStyle::Double => Some('║'),
        }
    }
}

const PLACEHOLDER_MIN: usize = 5;

/// Composes output lines for a fixed set of column widths.
#[derive(Clone, Debug)]
pub struct Decorator<'a> {
    config: &'a ResolvedConfig,
    widths: &'a [usize],
    table_width: usize,
}

impl<'a> Decorator<'a> {
    /// Creates a decorator for columns of the given widths.
    pub fn new(config: &'a ResolvedConfig, widths: &'a [usize]) -> Self {
        let padding = config.padding.size;
        let cells: usize = widths.iter().map(|w| w + 2 * padding).sum();
        Decorator {
            config,
            widths,
            table_width: cells + config.border.overhead(widths.len()),
        }
    }

    /// Character count of every full-width line.
    pub fn table_width(&self) -> usize {
        self.table_width
    }

    fn border_decoration(&self) -> Decoration {
        Decoration::foreground(self.config.border.color)
    }

    /// Pushes a vertical glyph, if configured, over the row background `bg`.
    fn push_vertical(&self, out: &mut String, bg: Option<Color>) {
        if let Some(glyph) = self.config.border.vertical {
            let mut buf = [0u8; 4];
            Decoration {
                bg,
                ..self.border_decoration()
            }
            .paint_into(out, glyph.encode_utf8(&mut buf));
        }
    }

    /// Joins cells into one line, placing vertical glyphs and painting each
    /// padding and text fragment separately.
    fn compose<T, P>(
        &self,
        cells: &[CellContent<'_>],
        edge: Option<Color>,
        text: T,
        padding: P,
    ) -> String
    where
        T: Fn(usize) -> Decoration,
        P: Fn(usize) -> Decoration,
    {
        let glyph = self.config.padding.glyph;
        let mut out = String::with_capacity(self.table_width * 2);
        self.push_vertical(&mut out, edge);
        for (i, cell) in cells.iter().enumerate() {
            let pad = padding(i);
            pad.paint_into(&mut out, &repeat_char(glyph, cell.left));
            text(i).paint_into(&mut out, cell.text);
            pad.paint_into(&mut out, &repeat_char(glyph, cell.right));
            self.push_vertical(&mut out, edge);
        }
        out
    }

    /// Wraps `texts` and composes one line per physical line.
    ///
    /// `edge` is the background of the row's vertical glyphs.
    fn compose_wrapped<S, T, P>(
        &self,
        texts: &[S],
        edge: Option<Color>,
        text: T,
        padding: P,
    ) -> Vec<String>
    where
        S: AsRef<str>,
        T: Fn(usize) -> Decoration,
        P: Fn(usize) -> Decoration,
    {
        let size = self.config.padding.size;
        wrap_row(texts, self.widths)
            .iter()
            .enumerate()
            .map(|(n, line)| {
                let cells = line_cells(line, self.widths, size, self.config.align, n > 0);
                self.compose(&cells, edge, &text, &padding)
            })
            .collect()
    }

    fn header_background(&self, column: usize) -> Option<Color> {
        let header = &self.config.header;
        cycle(&header.bg_color_columns, column).or(header.bg_color)
    }

    /// Header line(s). Long names wrap like body cells.
    pub fn header_lines<S: AsRef<str>>(&self, headers: &[S]) -> Vec<String> {
        let header = &self.config.header;
        self.compose_wrapped(
            headers,
            header.bg_color,
            |i| Decoration {
                fg: header.text_color,
                bg: self.header_background(i),
                bold: header.bold,
                italic: header.italic,
                underline: header.underline,
            },
            |i| Decoration::background(self.header_background(i)),
        )
    }

    /// A plain line of `glyph` spanning the table width.
    pub fn rule(&self, glyph: char) -> String {
        repeat_char(glyph, self.table_width)
    }

    /// The horizontal border line, if a horizontal glyph is configured.
    pub fn border_line(&self) -> Option<String> {
        self.config
            .border
            .horizontal
            .map(|glyph| self.border_decoration().paint(&self.rule(glyph)))
    }

    /// Background of a body cell, or of the row's vertical glyphs when
    /// `column` is `None`.
    ///
    /// Priority: highlighted row, column cycling, stripe on odd display
    /// rows, body background.
    fn body_background(
        &self,
        display_index: usize,
        highlighted: bool,
        column: Option<usize>,
    ) -> Option<Color> {
        let body = &self.config.body;
        let highlight = if highlighted { body.highlight_row_color } else { None };
        let stripe = if body.striped && display_index % 2 == 1 {
            body.stripe_color
        } else {
            None
        };
        highlight
            .or_else(|| column.and_then(|c| cycle(&body.bg_color_columns, c)))
            .or(stripe)
            .or(body.bg_color)
    }

    /// Line(s) of one body row.
    ///
    /// `highlight_cell` answers whether the cell in the given column is
    /// highlighted.
    pub fn body_lines<S, H>(
        &self,
        texts: &[S],
        display_index: usize,
        highlight_row: bool,
        highlight_cell: H,
    ) -> Vec<String>
    where
        S: AsRef<str>,
        H: Fn(usize) -> bool,
    {
        let body = &self.config.body;
        let flags: Vec<bool> = (0..texts.len()).map(highlight_cell).collect();
        self.compose_wrapped(
            texts,
            self.body_background(display_index, highlight_row, None),
            |i| {
                let fg = if flags[i] {
                    body.highlight_cell_color.or(body.text_color)
                } else {
                    body.text_color
                };
                Decoration {
                    fg,
                    bg: self.body_background(display_index, highlight_row, Some(i)),
                    ..Decoration::none()
                }
            },
            |i| Decoration::background(self.body_background(display_index, highlight_row, Some(i))),
        )
    }

    /// Line(s) of the accumulation row.
    pub fn accumulation_lines<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let color = self.config.accumulation.bg_color;
        let bg = Decoration::background(color);
        self.compose_wrapped(texts, color, |_| bg, |_| bg)
    }

    /// The line standing in for elided rows: `<--...-->` centered in the
    /// table, about three quarters of its width.
    pub fn placeholder(&self) -> String {
        let vertical = self.config.border.vertical.is_some();
        let inner = if vertical {
            self.table_width.saturating_sub(2)
        } else {
            self.table_width
        };

        let bar = if inner < PLACEHOLDER_MIN {
            "...".chars().take(inner).collect::<String>()
        } else {
            let len = (self.table_width * 3 / 4).max(PLACEHOLDER_MIN).min(inner);
            let dashes = len - PLACEHOLDER_MIN;
            let left = dashes / 2;
            format!(
                "<{}...{}>",
                repeat_char('-', left),
                repeat_char('-', dashes - left)
            )
        };

        let (left, right) = Align::Center.split(inner - text_width(&bar));
        let mut out = String::with_capacity(self.table_width);
        if vertical {
            self.push_vertical(&mut out, None);
        }
        out.push_str(&repeat_char(' ', left));
        out.push_str(&bar);
        out.push_str(&repeat_char(' ', right));
        if vertical {
            self.push_vertical(&mut out, None);
        }
        out
    }
}

fn cycle(colors: &[Color], column: usize) -> Option<Color> {
    if colors.is_empty() {
        None
    } else {
        Some(colors[column % colors.len()])
    }
}
