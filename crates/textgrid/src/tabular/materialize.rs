//! Dataset materialization.
//!
//! Turns the caller's rows into the engine's working copy: every row
//! becomes a record holding the dataset fields, then each dynamic column in
//! registration order, then the origin column `#` carrying the row's index
//! in the unsorted dataset. Dynamic values and origins are frozen here, so
//! they travel with their row through any sort.
//!
//! Materialization covers the whole dataset; [`select`] narrows the
//! working copy to the subset range and the row filter afterwards.

use crate::config::ORIGIN_COLUMN;
use crate::value::{Row, Value};

use super::traits::{DynamicColumnFn, RowFilter};
use super::types::Subset;

/// A working-copy row.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterializedRow {
    /// Index of the row in the unsorted dataset.
    pub origin: usize,
    /// Dataset fields, dynamic columns and `#`, as a record.
    pub row: Row,
}

impl MaterializedRow {
    /// Looks up a cell; missing fields read as `None`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.row.get(column)
    }
}

/// Materializes `rows`, pairing each with its origin index.
///
/// Dynamic functions run once per row, in dataset order, with the original
/// row and its origin. Pass `0..` as `origins` for a dataset that has never
/// been sorted.
pub fn materialize<I>(
    rows: &[Row],
    origins: I,
    dynamic: &[(String, DynamicColumnFn)],
) -> Vec<MaterializedRow>
where
    I: IntoIterator<Item = usize>,
{
    rows.iter()
        .zip(origins)
        .map(|(original, origin)| {
            let mut fields: Vec<(String, Value)> = match original {
                Row::Record(fields) => fields.clone(),
                Row::Array(values) => values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone()))
                    .collect(),
            };
            for (name, func) in dynamic {
                let value = func(original, origin);
                fields.push((name.clone(), value));
            }
            fields.push((ORIGIN_COLUMN.to_string(), Value::from(origin)));
            MaterializedRow {
                origin,
                row: Row::Record(fields),
            }
        })
        .collect()
}

/// Keeps the rows whose origin lies in `subset` (clamped to `dataset_len`)
/// and that pass `filter`, preserving their order.
pub fn select(
    rows: Vec<MaterializedRow>,
    subset: Subset,
    dataset_len: usize,
    filter: Option<&RowFilter>,
) -> Vec<MaterializedRow> {
    let range = subset.clamp(dataset_len);
    rows.into_iter()
        .filter(|m| range.contains(&m.origin))
        .filter(|m| filter.map_or(true, |keep| keep(&m.row, m.origin)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn people() -> Vec<Row> {
        vec![
            Row::record([("id", Value::from(1)), ("name", Value::from("Ada"))]),
            Row::record([("id", Value::from(45)), ("name", Value::from("Grace"))]),
            Row::record([("id", Value::from(421)), ("name", Value::from("Linus"))]),
        ]
    }

    #[test]
    fn adds_origin_column_last() {
        let rows = materialize(&people(), 0.., &[]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].origin, 2);
        assert_eq!(rows[2].row.keys(), vec!["id", "name", "#"]);
        assert_eq!(rows[2].get("#"), Some(&Value::from(2usize)));
    }

    #[test]
    fn origins_follow_the_given_order() {
        let rows = materialize(&people(), [2, 0, 1], &[]);
        assert_eq!(rows[0].get("#"), Some(&Value::from(2usize)));
        assert_eq!(rows[0].get("name"), Some(&Value::from("Ada")));
        assert_eq!(rows[1].origin, 0);
    }

    #[test]
    fn array_rows_become_positional_records() {
        let data = vec![Row::array([2, 14]), Row::array([15, 3])];
        let rows = materialize(&data, 0.., &[]);
        assert_eq!(rows[1].row.keys(), vec!["0", "1", "#"]);
        assert_eq!(rows[1].get("1"), Some(&Value::from(3)));
    }

    #[test]
    fn dynamic_columns_run_once_in_order_with_origin() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let dynamic: Vec<(String, DynamicColumnFn)> = vec![(
            "double".to_string(),
            Box::new(move |row: &Row, index: usize| {
                seen.borrow_mut().push(index);
                let id = row.get("id").and_then(Value::as_number).map(|n| n.to_f64());
                Value::from(id.map(|v| v * 2.0))
            }),
        )];

        let rows = materialize(&people(), [1, 2, 0], &dynamic);

        assert_eq!(*calls.borrow(), vec![1, 2, 0]);
        assert_eq!(rows[1].origin, 2);
        assert_eq!(rows[1].get("double"), Some(&Value::from(90.0)));
        assert_eq!(rows[1].row.keys(), vec!["id", "name", "double", "#"]);
    }

    #[test]
    fn subset_is_clamped() {
        let rows = || materialize(&people(), 0.., &[]);
        assert_eq!(select(rows(), Subset::range(1, 2), 3, None).len(), 1);
        assert_eq!(select(rows(), Subset::range(2, 99), 3, None).len(), 1);
        assert!(select(rows(), Subset::from(10), 3, None).is_empty());
    }

    #[test]
    fn subset_selects_by_origin_not_position() {
        let rows = materialize(&people(), [2, 1, 0], &[]);
        let kept = select(rows, Subset::from(1), 3, None);
        let names: Vec<_> = kept.iter().map(|m| m.get("name").cloned()).collect();
        assert_eq!(
            names,
            vec![Some(Value::from("Grace")), Some(Value::from("Linus"))]
        );
    }

    #[test]
    fn filter_sees_origin_index() {
        let keep_odd: RowFilter = Box::new(|_row: &Row, origin: usize| origin % 2 == 1);
        let rows = select(materialize(&people(), 0.., &[]), Subset::all(), 3, Some(&keep_odd));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&Value::from("Grace")));
    }
}
