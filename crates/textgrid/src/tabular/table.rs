//! The table engine: dataset, configuration, hooks and the cached layout.
//!
//! A [`Table`] owns its dataset and resolved configuration. Mutators only
//! mark the table dirty; the next read (a render or a layout query)
//! rebuilds the layout once and caches it until the next mutation:
//!
//! 1. materialize the dataset (dynamic columns, `#`)
//! 2. resolve the visible columns against the first row's shape
//! 3. sort, reordering the stored dataset to match
//! 4. keep the subset range and the rows passing the filter
//! 5. reduce the accumulation row over every kept row
//! 6. stringify each visible cell, applying fill-empty functions
//! 7. negotiate column widths
//!
//! Every stored row carries its origin: its index in the dataset before
//! any sort. `#` shows the origin, and the subset range selects by it.
//!
//! Rendering composes lines from the cached layout, so switching between
//! styled and plain output never rebuilds.
//!
//! # Example
//!
//! ```rust
//! use textgrid::{Row, Table, TableConfig, Value};
//!
//! let rows = vec![
//!     Row::record([("id", Value::from(1)), ("name", Value::from("Ada"))]),
//!     Row::record([("id", Value::from(45)), ("name", Value::from("Grace"))]),
//! ];
//! let config = TableConfig::from_yaml("header: { origin: false }").unwrap();
//! let mut table = Table::new(rows, config).unwrap();
//!
//! assert_eq!(
//!     table.render_plain().unwrap(),
//!     "  id    name   \n===============\n  1     Ada    \n  45    Grace  \n"
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::config::{ResolvedConfig, TableConfig, ORIGIN_COLUMN};
use crate::error::{Result, TableError};
use crate::value::{Row, Value};

use super::columns::resolve_columns;
use super::decorator::Decorator;
use super::materialize::{materialize, select, MaterializedRow};
use super::ordering::{orderings, sort_rows};
use super::reduce::StatsReducer;
use super::resolve::{resolve_widths, ResolvedWidths, WidthOptions};
use super::stringify::{cell_text, DefaultStringifier};
use super::traits::{
    CellPredicate, DynamicColumnFn, FillEmptyFn, Reducer, RowFilter, RowPredicate, Stringifier,
};
use super::types::{AccumulationSpec, Dir, Peek, SortSpec, Subset};

static NULL: Value = Value::Null;

/// Closure-valued options and the two formatting collaborators.
struct Hooks {
    dynamic: Vec<(String, DynamicColumnFn)>,
    fill_empty: Vec<(String, FillEmptyFn)>,
    highlight_cell: Option<CellPredicate>,
    highlight_row: Option<RowPredicate>,
    filter: Option<RowFilter>,
    stringifier: Box<dyn Stringifier>,
    reducer: Box<dyn Reducer>,
}

impl Default for Hooks {
    fn default() -> Self {
        Hooks {
            dynamic: Vec::new(),
            fill_empty: Vec::new(),
            highlight_cell: None,
            highlight_row: None,
            filter: None,
            stringifier: Box::new(DefaultStringifier),
            reducer: Box::new(StatsReducer),
        }
    }
}

/// Everything a render needs, computed once per build.
#[derive(Debug)]
struct Layout {
    columns: Vec<String>,
    headers: Vec<String>,
    rows: Vec<MaterializedRow>,
    cells: Vec<Vec<String>>,
    accumulation: Option<Accumulation>,
    widths: ResolvedWidths,
    table_width: usize,
}

#[derive(Debug)]
struct Accumulation {
    values: Vec<(String, Value)>,
    texts: Vec<String>,
}

/// A renderable table.
pub struct Table {
    data: Vec<Row>,
    /// Origin of each stored row; a permutation of `0..data.len()`.
    origins: Vec<usize>,
    config: ResolvedConfig,
    hooks: Hooks,
    /// `None` while dirty.
    layout: Option<Box<Layout>>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rows", &self.data.len())
            .field("config", &self.config)
            .field(
                "dynamic",
                &self.hooks.dynamic.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .field("dirty", &self.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Creates a table, resolving `config`.
    pub fn new(data: Vec<Row>, config: TableConfig) -> Result<Self> {
        Ok(Self::with_resolved(data, config.resolve()?))
    }

    /// Creates a table from an already resolved configuration.
    pub fn with_resolved(data: Vec<Row>, config: ResolvedConfig) -> Self {
        Table {
            origins: (0..data.len()).collect(),
            data,
            config,
            hooks: Hooks::default(),
            layout: None,
        }
    }

    /// Creates a table from serializable records.
    ///
    /// Structs and maps become record rows in field order; sequences become
    /// array rows.
    pub fn from_serialize<T: Serialize>(items: &[T], config: TableConfig) -> Result<Self> {
        let data = items
            .iter()
            .map(Row::from_serialize)
            .collect::<Result<Vec<_>>>()?;
        Self::new(data, config)
    }

    fn invalidate(&mut self, reason: &'static str) {
        if self.layout.take().is_some() {
            tracing::trace!(reason, "table layout invalidated");
        }
    }

    // Hooks

    /// Adds a derived column computed from each original row and its index.
    ///
    /// Dynamic columns follow the dataset fields, in registration order.
    pub fn with_dynamic_column<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Row, usize) -> Value + 'static,
    {
        self.hooks.dynamic.push((name.into(), Box::new(func)));
        self.invalidate("dynamic column added");
        self
    }

    /// Replaces empty cells of `column` with the function's result.
    pub fn with_fill_empty<F>(mut self, column: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Row, usize) -> Value + 'static,
    {
        self.hooks.fill_empty.push((column.into(), Box::new(func)));
        self.invalidate("fill-empty function added");
        self
    }

    /// Highlights the text of cells for which `predicate(value, row, column)`
    /// holds.
    pub fn with_highlight_cell<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, usize, &str) -> bool + 'static,
    {
        self.hooks.highlight_cell = Some(Box::new(predicate));
        self
    }

    /// Highlights the background of rows for which `predicate(row, index)`
    /// holds.
    pub fn with_highlight_row<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row, usize) -> bool + 'static,
    {
        self.hooks.highlight_row = Some(Box::new(predicate));
        self
    }

    /// Keeps only rows for which `predicate(row, origin)` holds.
    pub fn with_row_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row, usize) -> bool + 'static,
    {
        self.hooks.filter = Some(Box::new(predicate));
        self.invalidate("row filter set");
        self
    }

    /// Replaces the value-to-text conversion.
    pub fn with_stringifier<S: Stringifier + 'static>(mut self, stringifier: S) -> Self {
        self.hooks.stringifier = Box::new(stringifier);
        self.invalidate("stringifier replaced");
        self
    }

    /// Replaces the accumulation reducer.
    pub fn with_reducer<R: Reducer + 'static>(mut self, reducer: R) -> Self {
        self.hooks.reducer = Box::new(reducer);
        self.invalidate("reducer replaced");
        self
    }

    // Mutators

    /// Replaces the dataset.
    pub fn set_data(&mut self, data: Vec<Row>) {
        self.origins = (0..data.len()).collect();
        self.data = data;
        self.invalidate("data replaced");
    }

    /// Appends one row.
    pub fn append_row(&mut self, row: Row) {
        self.origins.push(self.data.len());
        self.data.push(row);
        self.invalidate("row appended");
    }

    /// Removes and returns the row at `index` of the stored, possibly
    /// sorted, dataset. Later origins close the gap.
    pub fn remove_row(&mut self, index: usize) -> Result<Row> {
        if index >= self.data.len() {
            return Err(TableError::RowOutOfRange {
                index,
                len: self.data.len(),
            });
        }
        let row = self.data.remove(index);
        let origin = self.origins.remove(index);
        for o in &mut self.origins {
            if *o > origin {
                *o -= 1;
            }
        }
        self.invalidate("row removed");
        Ok(row)
    }

    /// Drops a column from every row, or a dynamic column by name.
    ///
    /// Array rows lose the value at position `name`; later positions shift
    /// down by one.
    pub fn remove_column(&mut self, name: &str) -> Result<()> {
        let before = self.hooks.dynamic.len();
        self.hooks.dynamic.retain(|(n, _)| n != name);
        let mut removed = self.hooks.dynamic.len() != before;
        for row in &mut self.data {
            removed |= row.remove_field(name);
        }
        if !removed {
            return Err(TableError::UnknownColumn(name.to_string()));
        }
        self.invalidate("column removed");
        Ok(())
    }

    /// Replaces the configuration. On error the previous one is kept.
    pub fn set_config(&mut self, config: TableConfig) -> Result<()> {
        self.config = config.resolve()?;
        self.invalidate("config replaced");
        Ok(())
    }

    /// Sorts by `columns`, most significant first, and keeps the order for
    /// later renders.
    ///
    /// The stored dataset is reordered by the next read, which also reports
    /// unknown columns. Origins move with their rows.
    pub fn sort(&mut self, columns: &[&str], directions: &[Dir]) -> Result<()> {
        let spec = SortSpec {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            directions: directions.to_vec(),
        };
        orderings(&spec)?;
        self.config.sort = Some(spec);
        self.invalidate("sort changed");
        Ok(())
    }

    /// Restricts the table to a range of the dataset.
    pub fn set_subset(&mut self, subset: Subset) {
        self.config.body.subset = subset;
        self.invalidate("subset changed");
    }

    /// Shows only the head and tail of the rows.
    pub fn set_peek(&mut self, peek: Option<Peek>) {
        self.config.body.peek = peek;
        self.invalidate("peek changed");
    }

    /// Replaces the accumulation columns; an empty list removes the row.
    pub fn set_accumulation(&mut self, columns: Vec<AccumulationSpec>) {
        self.config.accumulation.columns = columns;
        self.invalidate("accumulation changed");
    }

    // Accessors

    /// The stored dataset, in its current (last built) order.
    pub fn data(&self) -> &[Row] {
        &self.data
    }

    /// Raw value of a stored cell. `#` answers the row's origin while the
    /// origin column is enabled.
    pub fn data_cell(&self, row: usize, column: &str) -> Option<Cow<'_, Value>> {
        if column == ORIGIN_COLUMN && self.config.header.origin {
            return self.origins.get(row).map(|&o| Cow::Owned(Value::from(o)));
        }
        self.data
            .get(row)
            .and_then(|r| r.get(column))
            .map(Cow::Borrowed)
    }

    /// Number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` when the next read will rebuild the layout.
    pub fn is_dirty(&self) -> bool {
        self.layout.is_none()
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    // Readers

    /// Renders the styled table.
    pub fn render(&mut self) -> Result<String> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(compose(layout, &self.config, &self.hooks))
    }

    /// Renders the table without any ANSI codes.
    pub fn render_plain(&mut self) -> Result<String> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(compose(layout, &self.config.plain(), &self.hooks))
    }

    /// Visible column identifiers, in display order.
    pub fn columns(&mut self) -> Result<&[String]> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(&layout.columns)
    }

    /// Negotiated column widths, without padding.
    pub fn widths(&mut self) -> Result<&ResolvedWidths> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(&layout.widths)
    }

    /// Reduced accumulation values, one per configured column.
    pub fn accumulation(&mut self) -> Result<&[(String, Value)]> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(layout
            .accumulation
            .as_ref()
            .map_or(&[][..], |acc| acc.values.as_slice()))
    }

    /// Character count of every full-width output line.
    pub fn width(&mut self) -> Result<usize> {
        let layout = ensure_layout(
            &mut self.layout,
            &mut self.data,
            &mut self.origins,
            &self.config,
            &self.hooks,
        )?;
        Ok(layout.table_width)
    }
}

fn ensure_layout<'a>(
    slot: &'a mut Option<Box<Layout>>,
    data: &mut Vec<Row>,
    origins: &mut Vec<usize>,
    config: &ResolvedConfig,
    hooks: &Hooks,
) -> Result<&'a Layout> {
    let layout = match slot.take() {
        Some(layout) => layout,
        None => {
            let layout = build(data, origins, config, hooks)?;
            tracing::debug!(
                rows = layout.rows.len(),
                columns = layout.columns.len(),
                width = layout.table_width,
                "rebuilt table layout"
            );
            Box::new(layout)
        }
    };
    Ok(slot.insert(layout))
}

/// Puts `data` and `origins` in the order of `sorted`.
fn reorder(data: &mut Vec<Row>, origins: &mut Vec<usize>, sorted: &[MaterializedRow]) {
    let mut slots: Vec<Option<Row>> = (0..data.len()).map(|_| None).collect();
    for (row, &origin) in data.drain(..).zip(origins.iter()) {
        if let Some(slot) = slots.get_mut(origin) {
            *slot = Some(row);
        }
    }
    *data = sorted
        .iter()
        .filter_map(|m| slots.get_mut(m.origin).and_then(Option::take))
        .collect();
    *origins = sorted.iter().map(|m| m.origin).collect();
}

fn build(
    data: &mut Vec<Row>,
    origins: &mut Vec<usize>,
    config: &ResolvedConfig,
    hooks: &Hooks,
) -> Result<Layout> {
    let mut rows = materialize(data, origins.iter().copied(), &hooks.dynamic);

    let shape = rows.first().map(|r| r.row.keys());
    if let Some(keys) = &shape {
        if let Some(unknown) = config
            .referenced_columns()
            .find(|name| !keys.iter().any(|k| k == name))
        {
            return Err(TableError::UnknownColumn(unknown.to_string()));
        }
    }
    let columns = resolve_columns(shape.as_deref(), &config.header)?;

    if let Some(sort) = &config.sort {
        sort_rows(&mut rows, sort)?;
        reorder(data, origins, &rows);
    }
    let rows = select(rows, config.body.subset, data.len(), hooks.filter.as_ref());

    let precision = config.body.precision;
    let stringifier = hooks.stringifier.as_ref();

    let accumulation = if config.accumulation.columns.is_empty() {
        None
    } else {
        let values: Vec<(String, Value)> = config
            .accumulation
            .columns
            .iter()
            .map(|spec| {
                let column: Vec<Value> = rows
                    .iter()
                    .map(|r| r.get(&spec.column).cloned().unwrap_or_default())
                    .collect();
                (
                    spec.column.clone(),
                    hooks.reducer.reduce(&column, spec.function),
                )
            })
            .collect();
        let texts = columns
            .iter()
            .map(|column| {
                if column == ORIGIN_COLUMN {
                    return String::new();
                }
                values
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| cell_text(value, precision, stringifier))
                    .unwrap_or_default()
            })
            .collect();
        Some(Accumulation { values, texts })
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let value = row.get(column).unwrap_or(&NULL);
                    if value.is_empty() {
                        if let Some((_, fill)) = hooks.fill_empty.iter().find(|(c, _)| c == column) {
                            return cell_text(&fill(&row.row, row.origin), precision, stringifier);
                        }
                    }
                    cell_text(value, precision, stringifier)
                })
                .collect()
        })
        .collect();

    let headers: Vec<String> = columns
        .iter()
        .map(|c| config.header.display_name(c))
        .collect();

    let options = WidthOptions {
        policy: config.header.width,
        max_width: config.header.max_width,
        origin: columns.iter().position(|c| c == ORIGIN_COLUMN),
        dataset_len: data.len(),
        padding: config.padding.size,
        border_overhead: config.border.overhead(columns.len()),
        fit_terminal: config.header.fit_terminal,
        terminal_width: config.header.terminal_width,
    };
    let widths = resolve_widths(
        &columns,
        &headers,
        &cells,
        accumulation.as_ref().map(|acc| acc.texts.as_slice()),
        &options,
    )?;
    let table_width = Decorator::new(config, &widths.widths).table_width();

    Ok(Layout {
        columns,
        headers,
        rows,
        cells,
        accumulation,
        widths,
        table_width,
    })
}

/// Composes the output lines of a built layout.
///
/// Row indices handed to the highlight predicates are positions in the
/// sorted and selected rows, peeked-out rows included.
fn compose(layout: &Layout, config: &ResolvedConfig, hooks: &Hooks) -> String {
    let deco = Decorator::new(config, &layout.widths.widths);
    let border = deco.border_line();
    let group_size = config.border.group_size;

    let mut lines = deco.header_lines(&layout.headers);
    if let Some(glyph) = config.header.separator {
        lines.push(deco.rule(glyph));
    }

    let count = layout.rows.len();
    let blocks = match config.body.peek.and_then(|peek| peek.bounds(count)) {
        Some((low, high)) => vec![0..low, count - high..count],
        None => vec![0..count],
    };

    for (b, block) in blocks.into_iter().enumerate() {
        if b > 0 {
            lines.push(deco.placeholder());
            lines.extend(border.clone());
        }
        let last = block.len();
        for (n, index) in block.enumerate() {
            let row = &layout.rows[index];
            let highlight_row = hooks
                .highlight_row
                .as_ref()
                .is_some_and(|predicate| predicate(&row.row, index));
            let highlight_cell = |i: usize| {
                hooks.highlight_cell.as_ref().is_some_and(|predicate| {
                    let column = &layout.columns[i];
                    predicate(row.get(column).unwrap_or(&NULL), index, column)
                })
            };
            lines.extend(deco.body_lines(&layout.cells[index], index, highlight_row, highlight_cell));
            if (n + 1) % group_size == 0 || n + 1 == last {
                lines.extend(border.clone());
            }
        }
    }

    if let Some(acc) = &layout.accumulation {
        if let Some(glyph) = config.accumulation.separator {
            lines.push(deco.rule(glyph));
        }
        lines.extend(deco.accumulation_lines(&acc.texts));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
