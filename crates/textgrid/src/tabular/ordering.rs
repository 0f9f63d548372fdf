//! Multi-key row ordering.
//!
//! Rows are compared key by key; the first key that differs decides, and
//! rows equal on every key keep their relative order (the sort is stable).
//! Null and NaN cells sort after every typed value in both directions.

use std::cmp::Ordering;

use crate::error::{Result, TableError};
use crate::value::{compare_values, Value};

use super::materialize::MaterializedRow;
use super::types::{Dir, SortSpec};

/// A single ordering clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy<'a> {
    /// The column to sort by.
    pub column: &'a str,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy<'_> {
    /// Compares two cells according to this clause.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let empty = |v: Option<&Value>| v.map_or(true, |v| v.is_null() || v.is_nan());
        match (empty(a), empty(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match (a, b) {
                (Some(a), Some(b)) => self.dir.apply(compare_values(a, b)),
                _ => Ordering::Equal,
            },
        }
    }
}

/// Pairs up sort columns and directions, failing when the lengths differ.
pub fn orderings(spec: &SortSpec) -> Result<Vec<OrderBy<'_>>> {
    if spec.columns.len() != spec.directions.len() {
        return Err(TableError::SortMismatch {
            columns: spec.columns.len(),
            directions: spec.directions.len(),
        });
    }
    Ok(spec
        .columns
        .iter()
        .zip(&spec.directions)
        .map(|(column, dir)| OrderBy {
            column,
            dir: *dir,
        })
        .collect())
}

/// Compares two rows using a list of clauses.
pub fn compare_by_orderings(
    a: &MaterializedRow,
    b: &MaterializedRow,
    orderings: &[OrderBy<'_>],
) -> Ordering {
    for order_by in orderings {
        let ordering = order_by.compare(a.get(order_by.column), b.get(order_by.column));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sorts `rows` in place.
///
/// Sort columns must exist in the row shape (dataset fields, dynamic
/// columns or `#`).
pub fn sort_rows(rows: &mut [MaterializedRow], spec: &SortSpec) -> Result<()> {
    let orderings = orderings(spec)?;
    if let Some(first) = rows.first() {
        if let Some(unknown) = orderings.iter().find(|o| !first.row.contains(o.column)) {
            return Err(TableError::UnknownColumn(unknown.column.to_string()));
        }
    }
    if !orderings.is_empty() {
        rows.sort_by(|a, b| compare_by_orderings(a, b, &orderings));
    }
    Ok(())
}
