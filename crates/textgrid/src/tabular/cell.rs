//! Cell padding and overflow wrapping.
//!
//! A logical row becomes one or more physical lines. The first line holds
//! the first `width` characters of every cell, aligned per the configured
//! mode. While any column still has overflow, another line is produced
//! holding the next `width`-sized slice of each overflowing column
//! (left-aligned) and an empty cell for the others.

use crate::util::{split_at_width, text_width};

use super::types::Align;

/// A left-pad / text / right-pad triple.
///
/// `left + text_width(text) + right == width + 2 * padding` for the column
/// it was built for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContent<'a> {
    /// Padding glyphs before the text.
    pub left: usize,
    /// Visible text.
    pub text: &'a str,
    /// Padding glyphs after the text.
    pub right: usize,
}

impl<'a> CellContent<'a> {
    /// Pads `text`, which must already fit in `width`.
    pub fn aligned(text: &'a str, width: usize, padding: usize, align: Align) -> Self {
        let fill = width.saturating_sub(text_width(text));
        let (left, right) = align.split(fill);
        CellContent {
            left: left + padding,
            text,
            right: right + padding,
        }
    }

    /// A cell with no text; its text area is filled with padding glyphs.
    pub fn empty(width: usize, padding: usize) -> Self {
        CellContent {
            left: padding + width,
            text: "",
            right: padding,
        }
    }

    /// Total characters of the cell.
    pub fn width(&self) -> usize {
        self.left + text_width(&self.text) + self.right
    }
}

/// One physical line of a logical row: a slice per column, or `None` where
/// a column has nothing left to show.
pub type LineSlices<'a> = Vec<Option<&'a str>>;

/// Splits a logical row into physical lines.
///
/// The first line always has a slice for every column, possibly empty.
/// Continuation lines are produced with an explicit loop over the
/// remaining overflow of each column.
pub fn wrap_row<'a, S: AsRef<str>>(texts: &'a [S], widths: &[usize]) -> Vec<LineSlices<'a>> {
    let mut remaining: Vec<&'a str> = Vec::with_capacity(texts.len());
    let mut first: LineSlices<'a> = Vec::with_capacity(texts.len());
    for (text, &width) in texts.iter().zip(widths) {
        let (visible, overflow) = split_at_width(text.as_ref(), width);
        first.push(Some(visible));
        remaining.push(overflow);
    }

    let mut lines = vec![first];
    while remaining.iter().any(|rest| !rest.is_empty()) {
        let line = remaining
            .iter_mut()
            .zip(widths)
            .map(|(rest, &width)| {
                if rest.is_empty() {
                    None
                } else {
                    let (slice, overflow) = split_at_width(rest, width);
                    *rest = overflow;
                    Some(slice)
                }
            })
            .collect();
        lines.push(line);
    }
    lines
}

/// Builds the cells of one physical line.
///
/// Line 0 uses `align`; continuation lines are left-aligned.
pub fn line_cells<'a>(
    line: &[Option<&'a str>],
    widths: &[usize],
    padding: usize,
    align: Align,
    continuation: bool,
) -> Vec<CellContent<'a>> {
    let align = if continuation { Align::Left } else { align };
    line.iter()
        .zip(widths)
        .map(|(slice, &width)| match slice {
            Some(text) => CellContent::aligned(text, width, padding, align),
            None => CellContent::empty(width, padding),
        })
        .collect()
}
