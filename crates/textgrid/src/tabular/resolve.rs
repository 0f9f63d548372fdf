//! Width resolution algorithm for table columns.
//!
//! Widths are negotiated from the already stringified cell texts under one
//! of three policies:
//!
//! - `Fixed(n)`: every column is `n` wide, and a header longer than `n` is
//!   an error.
//! - `Auto`: each column is as wide as its longest text (header, body rows,
//!   then the accumulation row), capped by `max_width`.
//! - `Stretch`: auto widths rescaled proportionally to the terminal.
//!
//! Under `Auto` and `Stretch` the origin column is sized from the dataset
//! length alone and never rescaled.

use crate::error::{Result, TableError};
use crate::util::{digit_count, text_width};

use super::types::WidthPolicy;

/// Terminal width assumed when none is configured or detected.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Resolved widths for all columns in a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width for each column in display characters.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific column.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all columns (without padding or borders).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Inputs of width negotiation besides the texts.
#[derive(Clone, Copy, Debug)]
pub struct WidthOptions {
    pub policy: WidthPolicy,
    pub max_width: Option<usize>,
    /// Position of the origin column among the visible columns.
    pub origin: Option<usize>,
    /// Length of the full dataset, for the origin column.
    pub dataset_len: usize,
    pub padding: usize,
    /// Characters the vertical border adds to a line.
    pub border_overhead: usize,
    /// Rescale whenever the table would overflow the terminal.
    pub fit_terminal: bool,
    pub terminal_width: Option<usize>,
}

impl WidthOptions {
    fn cap(&self, width: usize) -> usize {
        self.max_width.map_or(width, |max| width.min(max))
    }

    /// Configured terminal width, else the detected one, else 80.
    pub fn terminal(&self) -> usize {
        self.terminal_width
            .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
            .unwrap_or(FALLBACK_TERMINAL_WIDTH)
    }
}

/// Negotiates the width of every visible column.
///
/// `headers[i]` is column `i`'s display name; `rows` and `accumulation`
/// hold stringified cell texts in column order.
pub fn resolve_widths<S: AsRef<str>>(
    columns: &[String],
    headers: &[String],
    rows: &[Vec<S>],
    accumulation: Option<&[S]>,
    options: &WidthOptions,
) -> Result<ResolvedWidths> {
    if let WidthPolicy::Fixed(n) = options.policy {
        if let Some((column, _)) = columns
            .iter()
            .zip(headers)
            .find(|(_, header)| text_width(header) > n)
        {
            return Err(TableError::ColumnTooNarrow {
                column: column.clone(),
                width: n,
            });
        }
        let widths = vec![options.cap(n); columns.len()];
        tracing::trace!(?widths, "fixed column widths");
        return Ok(ResolvedWidths { widths });
    }

    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| options.cap(text_width(header)))
        .collect();

    for row in rows.iter().map(Vec::as_slice).chain(accumulation) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = options.cap((*width).max(text_width(cell.as_ref())));
        }
    }

    if let Some(origin) = options.origin {
        if let Some(width) = widths.get_mut(origin) {
            *width = digit_count(options.dataset_len).max(1);
        }
    }

    let mut resolved = ResolvedWidths { widths };
    stretch(&mut resolved, options);
    tracing::trace!(widths = ?resolved.widths, "negotiated column widths");
    Ok(resolved)
}

/// Rescales non-origin widths to the terminal when the policy asks for it.
///
/// Each width becomes `floor(width * available / total)`, at least 1 and at
/// most `max_width`; the lost remainder is not redistributed.
fn stretch(resolved: &mut ResolvedWidths, options: &WidthOptions) {
    let columns = resolved.len();
    if columns == 0 {
        return;
    }

    let origin_width = options
        .origin
        .and_then(|i| resolved.get(i))
        .unwrap_or(0);
    let total = resolved.total() - origin_width;
    if total == 0 {
        return;
    }

    let terminal = options.terminal();
    let available = terminal
        .saturating_sub(2 * options.padding * columns)
        .saturating_sub(options.border_overhead)
        .saturating_sub(origin_width);

    let rescale = match options.policy {
        WidthPolicy::Stretch => true,
        _ => options.fit_terminal && total > available,
    };
    if !rescale {
        return;
    }

    tracing::trace!(terminal, available, total, "stretching column widths");
    for (i, width) in resolved.widths.iter_mut().enumerate() {
        if Some(i) == options.origin {
            continue;
        }
        *width = options.cap((*width * available / total).max(1));
    }
}
