//! Whole-table rendering tests against the employee fixture.

mod common;

use common::employees;
use console::strip_ansi_codes;
use textgrid::tabular::FunctionTag;
use textgrid::{AccumulationSpec, Dir, Peek, Row, Table, TableConfig, TableError, Value};

fn table(yaml: &str) -> Table {
    let config = TableConfig::from_yaml(yaml).expect("fixture config parses");
    Table::new(employees(), config).expect("fixture config resolves")
}

#[test]
fn test_include_selects_and_orders_columns() {
    let mut t = table("header: { origin: false, include: [id, lastname, gender] }");
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  id      lastname    gender  \n",
            "==============================\n",
            "  1       Lovelace    Female  \n",
            "  45      Hopper      Female  \n",
            "  421     Torvalds    Male    \n",
            "  2003    Turing      Male    \n",
            "  892     Dijkstra    Male    \n",
            "  17      Hamilton    Female  \n",
        )
    );
}

#[test]
fn test_sort_groups_then_orders_within_group() {
    let mut t = table("header: { include: [id, gender] }");
    t.sort(&["gender", "id"], &[Dir::Asc, Dir::Desc]).unwrap();
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  #    id      gender  \n",
            "=======================\n",
            "  1    45      Female  \n",
            "  5    17      Female  \n",
            "  0    1       Female  \n",
            "  3    2003    Male    \n",
            "  4    892     Male    \n",
            "  2    421     Male    \n",
        )
    );
}

#[test]
fn test_sort_from_config_matches_sort_call() {
    let mut configured = table(
        "header: { include: [id, gender] }\nsort: { columns: [gender, id], directions: [asc, desc] }",
    );
    let mut called = table("header: { include: [id, gender] }");
    called.sort(&["gender", "id"], &[Dir::Asc, Dir::Desc]).unwrap();
    assert_eq!(
        configured.render_plain().unwrap(),
        called.render_plain().unwrap()
    );
}

#[test]
fn test_sort_length_mismatch() {
    let mut t = table("{}");
    assert!(matches!(
        t.sort(&["gender", "id"], &[Dir::Asc]),
        Err(TableError::SortMismatch {
            columns: 2,
            directions: 1
        })
    ));
}

#[test]
fn test_symmetric_peek() {
    let mut t = table("header: { include: [id, firstname] }\nbody: { peek: 2 }");
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  #    id      firstname  \n",
            "==========================\n",
            "  0    1       Ada        \n",
            "  1    45      Grace      \n",
            "   <-------...------->    \n",
            "  4    892     Edsger     \n",
            "  5    17      Margaret   \n",
        )
    );
}

#[test]
fn test_pair_peek_without_leading_rows() {
    let mut t = table("header: { include: [id, firstname] }");
    t.set_peek(Some(Peek::Range(0, 2)));
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  #    id      firstname  \n",
            "==========================\n",
            "   <-------...------->    \n",
            "  4    892     Edsger     \n",
            "  5    17      Margaret   \n",
        )
    );
}

#[test]
fn test_peek_covering_everything_shows_all_rows() {
    let mut t = table("body: { peek: 3 }");
    let out = t.render_plain().unwrap();
    assert_eq!(out.lines().count(), 2 + 6);
    assert!(!out.contains("..."));
}

#[test]
fn test_accumulation_row() {
    let mut t = table(
        r#"
header: { origin: false, include: [id, lastname] }
accumulation:
  columns:
    - { column: id, function: MEAN }
"#,
    );
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  id         lastname  \n",
            "=======================\n",
            "  1          Lovelace  \n",
            "  45         Hopper    \n",
            "  421        Torvalds  \n",
            "  2003       Turing    \n",
            "  892        Dijkstra  \n",
            "  17         Hamilton  \n",
            "-----------------------\n",
            "  563.167              \n",
        )
    );
}

#[test]
fn test_accumulation_ignores_peek() {
    let mut t = table("body: { peek: 1 }");
    t.set_accumulation(vec![
        AccumulationSpec::new("id", FunctionTag::Count),
        AccumulationSpec::new("email", FunctionTag::Count),
    ]);
    let values = t.accumulation().unwrap().to_vec();
    assert_eq!(
        values,
        vec![
            ("id".to_string(), Value::from(6usize)),
            ("email".to_string(), Value::from(5usize)),
        ]
    );
    let out = t.render_plain().unwrap();
    let last = out.lines().last().unwrap();
    assert!(last.contains('6') && last.contains('5'));
}

#[test]
fn test_grouped_horizontal_borders() {
    let mut t = table(
        "header: { origin: false, include: [id, firstname] }\nborder: { style: ascii, group_size: 2 }",
    );
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "|  id    |  firstname  |\n",
            "========================\n",
            "|  1     |  Ada        |\n",
            "|  45    |  Grace      |\n",
            "------------------------\n",
            "|  421   |  Linus      |\n",
            "|  2003  |  Alan       |\n",
            "------------------------\n",
            "|  892   |  Edsger     |\n",
            "|  17    |  Margaret   |\n",
            "------------------------\n",
        )
    );
}

#[test]
fn test_max_width_wraps_header_and_cells() {
    let mut t = table("align: right\nheader: { origin: false, include: [firstname, email], max_width: 8 }");
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  firstnam       email  \n",
            "  e                     \n",
            "========================\n",
            "       Ada    ada@exam  \n",
            "              ple.com   \n",
            "     Grace    grace@ex  \n",
            "              ample.co  \n",
            "              m         \n",
            "     Linus    linus@ex  \n",
            "              ample.co  \n",
            "              m         \n",
            "      Alan    alan@exa  \n",
            "              mple.com  \n",
            "    Edsger    edsger@e  \n",
            "              xample.c  \n",
            "              om        \n",
            "  Margaret              \n",
        )
    );
}

#[test]
fn test_fixed_width_lines_have_table_width() {
    let mut t = table("header: { width: 9 }\nborder: { style: light }");
    let width = t.width().unwrap();
    assert_eq!(width, 7 * (9 + 4) + 8);
    for line in t.render_plain().unwrap().lines() {
        assert_eq!(line.chars().count(), width, "{:?}", line);
    }
}

#[test]
fn test_fixed_width_too_narrow_for_header() {
    let mut t = table("header: { width: 4 }");
    assert!(matches!(
        t.render(),
        Err(TableError::ColumnTooNarrow { ref column, width: 4 }) if column == "firstname"
    ));
}

#[test]
fn test_stretch_fits_terminal() {
    let mut t = table("header: { width: stretch, terminal_width: 60 }");
    let width = t.width().unwrap();
    assert!(width <= 60, "table is {} wide", width);
    assert!(width > 40, "table is {} wide", width);
    for line in t.render_plain().unwrap().lines() {
        assert_eq!(line.chars().count(), width);
    }
}

#[test]
fn test_dates_and_display_names() {
    let mut t = table(
        "header: { origin: false, include: [lastname, birthdate], display_names: { birthdate: born }, uppercase: true }",
    );
    let out = t.render_plain().unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next().unwrap().split_whitespace().collect::<Vec<_>>(), ["LASTNAME", "BORN"]);
    assert!(out.contains("Lovelace    1815-12-10"));
}

#[test]
fn test_unknown_columns_are_reported() {
    for yaml in [
        "header: { include: [id, salary] }",
        "header: { exclude: [salary] }",
        "header: { order: [salary] }",
        "sort: { columns: [salary], directions: [asc] }",
        "accumulation: { columns: [{ column: salary, function: SUM }] }",
    ] {
        let mut t = table(yaml);
        assert!(
            matches!(t.render(), Err(TableError::UnknownColumn(ref c)) if c == "salary"),
            "{}",
            yaml
        );
    }
}

#[test]
fn test_styled_output_strips_to_plain() {
    let mut t = table(
        r##"
border: { style: rounded, color: "#5f87af" }
header: { bold: true, text_color: white, bg_color_columns: [blue, "#303030"] }
body: { text_color: "252", bg_color_columns: ["#1c1c1c"] }
accumulation: { columns: [{ column: id, function: MAX }], bg_color: magenta }
"##,
    )
    .with_highlight_row(|row: &Row, _| row.get("gender") == Some(&Value::from("Male")))
    .with_highlight_cell(|value: &Value, _, column: &str| column == "id" && value == &Value::from(45));

    let styled = t.render().unwrap();
    let plain = t.render_plain().unwrap();
    assert!(styled.contains('\x1b'));
    assert!(!plain.contains('\x1b'));
    assert_eq!(strip_ansi_codes(&styled), plain);
}

#[test]
fn test_render_is_idempotent() {
    let mut t = table("body: { peek: [1, 2] }\nborder: { style: double }");
    let first = t.render().unwrap();
    assert_eq!(t.render().unwrap(), first);
    assert_eq!(t.render_plain().unwrap(), t.render_plain().unwrap());
}

#[test]
fn test_plain_char_replaces_padding() {
    let mut t = table("padding: { size: 1, plain_char: '.' }\nheader: { origin: false, include: [id] }");
    let plain = t.render_plain().unwrap();
    assert_eq!(plain.lines().next().unwrap(), ".id...");
    assert_eq!(plain.lines().nth(2).unwrap(), ".1....");
    assert!(strip_ansi_codes(&t.render().unwrap()).starts_with(" id   \n"));
}

#[test]
fn test_mutations_rebuild_layout() {
    let mut t = table("header: { origin: false, include: [id] }");
    assert_eq!(t.widths().unwrap().widths, vec![4]);

    t.append_row(Row::record([("id", Value::from(123456))]));
    assert_eq!(t.widths().unwrap().widths, vec![6]);

    t.remove_row(6).unwrap();
    t.set_data(employees().into_iter().take(2).collect());
    assert_eq!(t.widths().unwrap().widths, vec![2]);
    assert_eq!(t.render_plain().unwrap().lines().count(), 4);
}

#[test]
fn test_dynamic_column_with_accumulation() {
    let mut t = table(
        "header: { origin: false, include: [lastname, initials] }\naccumulation: { columns: [{ column: initials, function: MODE }] }",
    )
    .with_dynamic_column("initials", |row: &Row, _| {
        let first = |key: &str| {
            row.get(key)
                .and_then(Value::as_str)
                .and_then(|s| s.chars().next())
                .unwrap_or('?')
        };
        Value::from(format!("{}{}", first("firstname"), first("lastname")))
    });
    let out = t.render_plain().unwrap();
    assert!(out.contains("Lovelace    AL"));
    assert_eq!(
        t.accumulation().unwrap(),
        [("initials".to_string(), Value::from("MH"))]
    );
}

#[test]
fn test_subset_keeps_original_indices() {
    let mut t = table("header: { include: [firstname] }\nbody: { subset: [2, 4] }");
    assert_eq!(
        t.render_plain().unwrap(),
        concat!(
            "  #    firstname  \n",
            "==================\n",
            "  2    Linus      \n",
            "  3    Alan       \n",
        )
    );
}
