//! Shared dataset for the rendering tests.

use chrono::NaiveDate;
use textgrid::{Row, Value};

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::from(NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date"))
}

fn employee(
    id: i64,
    firstname: &str,
    lastname: &str,
    email: Option<&str>,
    gender: &str,
    birthdate: Value,
) -> Row {
    Row::record([
        ("id", Value::from(id)),
        ("firstname", Value::from(firstname)),
        ("lastname", Value::from(lastname)),
        ("email", Value::from(email)),
        ("gender", Value::from(gender)),
        ("birthdate", birthdate),
    ])
}

pub fn employees() -> Vec<Row> {
    vec![
        employee(1, "Ada", "Lovelace", Some("ada@example.com"), "Female", date(1815, 12, 10)),
        employee(45, "Grace", "Hopper", Some("grace@example.com"), "Female", date(1906, 12, 9)),
        employee(421, "Linus", "Torvalds", Some("linus@example.com"), "Male", date(1969, 12, 28)),
        employee(2003, "Alan", "Turing", Some("alan@example.com"), "Male", date(1912, 6, 23)),
        employee(892, "Edsger", "Dijkstra", Some("edsger@example.com"), "Male", date(1930, 5, 11)),
        employee(17, "Margaret", "Hamilton", None, "Female", date(1936, 8, 17)),
    ]
}
