//! Extension seams for value formatting, reduction and per-row hooks.
//!
//! [`Stringifier`] and [`Reducer`] are the two collaborators the layout
//! engine calls as black boxes. Both are implemented for plain closures, so
//! a one-off override does not need a named type:
//!
//! ```rust
//! use textgrid::{Stringifier, Value};
//!
//! let shouting = |v: &Value| format!("{:?}", v).to_uppercase();
//! assert_eq!(shouting.stringify(&Value::Null), "NULL");
//! ```

use crate::value::{Row, Value};

use super::reduce::FunctionTag;

/// Converts a cell value to display text.
///
/// Implementations must be total and return `""` for null and NaN.
pub trait Stringifier {
    /// Returns the display text for `value`.
    fn stringify(&self, value: &Value) -> String;
}

impl<F> Stringifier for F
where
    F: Fn(&Value) -> String,
{
    fn stringify(&self, value: &Value) -> String {
        self(value)
    }
}

/// Reduces a column's values to one scalar for the accumulation row.
///
/// Null elements must be skipped. An input with no usable values yields
/// [`Value::Null`].
pub trait Reducer {
    /// Reduces `values` with the function named by `tag`.
    fn reduce(&self, values: &[Value], tag: FunctionTag) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(&[Value], FunctionTag) -> Value,
{
    fn reduce(&self, values: &[Value], tag: FunctionTag) -> Value {
        self(values, tag)
    }
}

/// Derives a dynamic column value from the original row and its original index.
pub type DynamicColumnFn = Box<dyn Fn(&Row, usize) -> Value>;

/// Replaces an empty cell, given the materialized row and its origin index.
pub type FillEmptyFn = Box<dyn Fn(&Row, usize) -> Value>;

/// Decides whether a cell is highlighted, given its raw value, display row
/// index and column identifier.
pub type CellPredicate = Box<dyn Fn(&Value, usize, &str) -> bool>;

/// Decides whether a whole row is highlighted, given the materialized row
/// and its display row index.
pub type RowPredicate = Box<dyn Fn(&Row, usize) -> bool>;

/// Keeps a materialized row when it returns `true`, given the row and its
/// origin index.
pub type RowFilter = Box<dyn Fn(&Row, usize) -> bool>;
