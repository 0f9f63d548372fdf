//! Property-based tests for table rendering using proptest.

mod common;

use console::strip_ansi_codes;
use proptest::prelude::*;
use textgrid::{Peek, Row, Table, TableConfig, Value};

// ============================================================================
// Strategies
// ============================================================================

fn cell_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i32>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z0-9 äöü@.]{0,24}".prop_map(Value::from),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Vec<Row>> {
    (1usize..5).prop_flat_map(|columns| {
        prop::collection::vec(
            prop::collection::vec(cell_strategy(), columns).prop_map(|cells| {
                Row::record(
                    cells
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (format!("col{}", i), v)),
                )
            }),
            0..12,
        )
    })
}

fn config_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("left"), Just("right"), Just("center")],
        0usize..3,
        prop_oneof![Just("none"), Just("ascii"), Just("heavy")],
        1usize..4,
        prop_oneof![
            Just("auto".to_string()),
            (6usize..12).prop_map(|n| n.to_string()),
            Just("stretch".to_string()),
        ],
        prop::option::of(2usize..10),
        prop::option::of(0usize..4),
    )
        .prop_map(|(align, padding, border, group, width, max_width, peek)| {
            let mut yaml = format!(
                "align: {}\npadding: {{ size: {} }}\nborder: {{ style: {}, group_size: {} }}\n\
                 header: {{ width: {}, terminal_width: 70, bold: true, bg_color: blue",
                align, padding, border, group, width
            );
            if let Some(max) = max_width {
                yaml.push_str(&format!(", max_width: {}", max));
            }
            yaml.push_str(" }\nbody: { text_color: green");
            if let Some(p) = peek {
                yaml.push_str(&format!(", peek: {}", p));
            }
            yaml.push_str(" }\naccumulation: { columns: [{ column: col0, function: COUNT }] }\n");
            yaml
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every output line spans exactly the table width.
    #[test]
    fn every_line_has_table_width(rows in dataset_strategy(), yaml in config_strategy()) {
        let config = TableConfig::from_yaml(&yaml).unwrap();
        let mut table = Table::new(rows, config).unwrap();
        let width = table.width().unwrap();
        let out = table.render_plain().unwrap();
        prop_assert!(out.ends_with('\n'));
        for line in out.lines() {
            prop_assert_eq!(line.chars().count(), width, "{:?}", line);
        }
    }

    /// Removing ANSI codes from a styled render gives the plain render.
    #[test]
    fn styled_strips_to_plain(rows in dataset_strategy(), yaml in config_strategy()) {
        let config = TableConfig::from_yaml(&yaml).unwrap();
        let mut table = Table::new(rows, config)
            .unwrap()
            .with_highlight_row(|_row: &Row, index: usize| index % 3 == 0)
            .with_highlight_cell(|value: &Value, _index: usize, _column: &str| value.is_null());
        let styled = table.render().unwrap();
        let plain = table.render_plain().unwrap();
        prop_assert_eq!(strip_ansi_codes(&styled).into_owned(), plain);
    }

    /// Rendering twice without a mutation gives the same output.
    #[test]
    fn render_is_idempotent(rows in dataset_strategy(), yaml in config_strategy()) {
        let config = TableConfig::from_yaml(&yaml).unwrap();
        let mut table = Table::new(rows, config).unwrap();
        let first = table.render().unwrap();
        prop_assert_eq!(table.render().unwrap(), first);
    }

    /// Peek never shows more data rows than it asks for.
    #[test]
    fn peek_bounds_visible_rows(low in 0usize..4, high in 0usize..4) {
        let mut table = Table::new(
            common::employees(),
            TableConfig::from_yaml("header: { separator: '' }").unwrap(),
        )
        .unwrap();
        table.set_peek(Some(Peek::Range(low, high)));
        let out = table.render_plain().unwrap();
        let body = out.lines().count() - 1;
        if low + high < 6 {
            prop_assert_eq!(body, low + high + 1);
        } else {
            prop_assert_eq!(body, 6);
        }
    }

    /// Sorting by the origin column restores dataset order after any sort.
    #[test]
    fn origin_sort_restores_order(desc in any::<bool>()) {
        let dir = if desc { textgrid::Dir::Desc } else { textgrid::Dir::Asc };
        let mut table = Table::new(common::employees(), TableConfig::default()).unwrap();
        let unsorted = table.render_plain().unwrap();
        table.sort(&["lastname"], &[dir]).unwrap();
        table.render_plain().unwrap();
        table.sort(&["#"], &[textgrid::Dir::Asc]).unwrap();
        prop_assert_eq!(table.render_plain().unwrap(), unsorted);
    }
}
