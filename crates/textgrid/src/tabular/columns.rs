//! Column resolution.
//!
//! Decides which columns are shown and in which order, from the explicit
//! order list, the origin flag, and either the include list or the first
//! row's keys minus the exclude list.

use crate::config::{HeaderOptions, ORIGIN_COLUMN};
use crate::error::{Result, TableError};

/// Resolves the visible column set.
///
/// `shape` is the first materialized row's keys (dataset fields, dynamic
/// columns, `#`), or `None` for an empty dataset. Names in the include,
/// exclude and order lists are checked against it; an empty dataset has no
/// shape to check against, so nothing is rejected.
pub fn resolve_columns(shape: Option<&[String]>, header: &HeaderOptions) -> Result<Vec<String>> {
    if let Some(keys) = shape {
        let lists = header
            .order
            .iter()
            .chain(header.exclude.iter())
            .chain(header.include.iter().flatten());
        for name in lists {
            if !keys.iter().any(|k| k == name) {
                return Err(TableError::UnknownColumn(name.clone()));
            }
        }
    }

    fn push(name: &str, columns: &mut Vec<String>) {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }

    let mut columns: Vec<String> = Vec::new();

    for name in &header.order {
        push(name, &mut columns);
    }
    if header.origin {
        push(ORIGIN_COLUMN, &mut columns);
    }
    match &header.include {
        Some(include) => {
            for name in include {
                push(name, &mut columns);
            }
        }
        None => {
            for key in shape.unwrap_or_default() {
                if key != ORIGIN_COLUMN && !header.exclude.contains(key) {
                    push(key, &mut columns);
                }
            }
        }
    }

    Ok(columns)
}
