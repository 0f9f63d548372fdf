//! Table layout and rendering.
//!
//! The engine turns a dataset of [`Row`](crate::Row)s into a fixed-width
//! text grid. [`Table`] is the entry point; the other items are the passes
//! it runs, exposed for callers that want to drive one of them directly.
//!
//! ## Pipeline
//!
//! | Pass | Module item |
//! |------|-------------|
//! | Dynamic columns and origin column | [`materialize`] |
//! | Visible columns and their order | [`resolve_columns`] |
//! | Multi-key stable sort | [`sort_rows`] |
//! | Subset range and row filter | [`select`] |
//! | Accumulation row | [`Reducer`] / [`StatsReducer`] |
//! | Value to text | [`Stringifier`] / [`DefaultStringifier`] |
//! | Width negotiation | [`resolve_widths`] |
//! | Padding and overflow wrapping | [`wrap_row`], [`CellContent`] |
//! | Borders, styling, peek placeholder | [`Decorator`] |
//!
//! ## Width Policies
//!
//! - [`WidthPolicy::Fixed(n)`] - every column exactly `n` characters
//! - [`WidthPolicy::Auto`] - each column as wide as its widest text
//! - [`WidthPolicy::Stretch`] - auto widths rescaled to the terminal
//!
//! Text longer than its column wraps onto continuation lines; nothing is
//! ever truncated.
//!
//! ## Example
//!
//! ```rust
//! use textgrid::tabular::{AccumulationSpec, FunctionTag, Peek, Table};
//! use textgrid::{Row, TableConfig, Value};
//!
//! let rows: Vec<Row> = (1..=6)
//!     .map(|i| Row::record([("n", Value::from(i))]))
//!     .collect();
//! let mut table = Table::new(rows, TableConfig::default()).unwrap();
//! table.set_peek(Some(Peek::Symmetric(2)));
//! table.set_accumulation(vec![AccumulationSpec::new("n", FunctionTag::Sum)]);
//!
//! let out = table.render_plain().unwrap();
//! // header, separator, 2 rows, placeholder, 2 rows, separator, total
//! assert_eq!(out.lines().count(), 9);
//! assert!(out.lines().last().unwrap().contains("21"));
//! ```

mod cell;
mod columns;
mod decorator;
mod materialize;
mod ordering;
mod reduce;
mod resolve;
mod stringify;
mod table;
mod traits;
mod types;

pub use cell::{line_cells, wrap_row, CellContent, LineSlices};
pub use columns::resolve_columns;
pub use decorator::{BorderStyle, Decorator};
pub use materialize::{materialize, select, MaterializedRow};
pub use ordering::{compare_by_orderings, orderings, sort_rows, OrderBy};
pub use reduce::{FunctionTag, StatsReducer};
pub use resolve::{resolve_widths, ResolvedWidths, WidthOptions, FALLBACK_TERMINAL_WIDTH};
pub use stringify::{cell_text, DefaultStringifier};
pub use table::Table;
pub use traits::{
    CellPredicate, DynamicColumnFn, FillEmptyFn, Reducer, RowFilter, RowPredicate, Stringifier,
};
pub use types::{AccumulationSpec, Align, Dir, HeaderCase, Peek, SortSpec, Subset, WidthPolicy};
