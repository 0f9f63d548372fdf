//! # Textgrid - Column-Aligned Text Tables
//!
//! `textgrid` renders an in-memory dataset into a fixed-width text grid for
//! terminal display or plain-text export. Rows may be records or arrays;
//! columns can be derived, selected, reordered and sorted; long cell text
//! wraps onto continuation lines; an accumulation row can summarize columns;
//! and peek mode elides the middle of long tables.
//!
//! ## Core Concepts
//!
//! - [`Value`] and [`Row`]: the dataset model
//! - [`TableConfig`]: a partial, serde-loadable configuration tree, resolved
//!   once into a [`ResolvedConfig`]
//! - [`Table`]: owns the dataset and rebuilds its layout lazily after each
//!   mutation
//! - [`Stringifier`] and [`Reducer`]: pluggable value formatting and
//!   accumulation functions
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use textgrid::{Table, TableConfig};
//!
//! #[derive(Serialize)]
//! struct Employee {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! let staff = [
//!     Employee { id: 1, name: "Ada" },
//!     Employee { id: 45, name: "Grace" },
//! ];
//! let config = TableConfig::from_yaml("
//! header:
//!   origin: false
//!   uppercase: true
//! border:
//!   style: ascii
//! ").unwrap();
//!
//! let mut table = Table::from_serialize(&staff, config).unwrap();
//! let out = table.render_plain().unwrap();
//! assert_eq!(out.lines().next().unwrap(), "|  ID  |  NAME   |");
//!
//! // Styled output carries ANSI codes around the same visible text.
//! let styled = table.render().unwrap();
//! assert_eq!(console::strip_ansi_codes(&styled), out);
//! ```
//!
//! ## Configuration
//!
//! Every option has a default, so configurations only name what they
//! change. See [`config`] for the full tree. Closure-valued options are set
//! on the table itself:
//!
//! ```rust
//! use textgrid::{Row, Table, TableConfig, Value};
//!
//! let rows = vec![
//!     Row::record([("item", Value::from("tea")), ("qty", Value::from(3))]),
//!     Row::record([("item", Value::from("cake")), ("qty", Value::Null)]),
//! ];
//! let mut table = Table::new(rows, TableConfig::default())
//!     .unwrap()
//!     .with_fill_empty("qty", |_row: &Row, _index: usize| Value::from(0))
//!     .with_highlight_row(|row: &Row, _index: usize| row.get("item") == Some(&Value::from("cake")));
//!
//! assert!(table.render_plain().unwrap().contains("cake    0"));
//! ```

pub mod config;
pub mod error;
pub mod style;
pub mod tabular;
mod util;
pub mod value;

pub use config::{ResolvedConfig, TableConfig, ORIGIN_COLUMN};
pub use error::{Result, TableError};
pub use tabular::{
    AccumulationSpec, Align, BorderStyle, Dir, FunctionTag, Peek, Reducer, Stringifier, Subset,
    Table, WidthPolicy,
};
pub use util::{rgb_to_ansi256, split_at_width};
pub use value::{Number, Row, Value};
