//! Default value stringification.

use crate::value::{Number, Value};

use super::traits::Stringifier;

/// The built-in [`Stringifier`].
///
/// - null and NaN render as empty text
/// - dates render as `YYYY-MM-DD`
/// - lists and maps render as compact JSON
/// - numbers render in plain decimal notation
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStringifier;

impl Stringifier for DefaultStringifier {
    fn stringify(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_text(*n),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::List(_) | Value::Map(_) => value.to_json().to_string(),
        }
    }
}

fn number_text(n: Number) -> String {
    match n {
        Number::I64(v) => v.to_string(),
        Number::U64(v) => v.to_string(),
        Number::F64(v) if v.is_nan() => String::new(),
        Number::F64(v) if v.is_infinite() => {
            if v > 0.0 {
                "Infinity".to_string()
            } else {
                "-Infinity".to_string()
            }
        }
        Number::F64(v) => v.to_string(),
    }
}

/// Resolves the display text of a cell.
///
/// Finite non-integral numbers are printed with `precision` decimals;
/// everything else goes through `stringifier`.
pub fn cell_text(value: &Value, precision: usize, stringifier: &dyn Stringifier) -> String {
    match value {
        Value::Number(n) if !n.is_integral() && !n.is_nan() && n.to_f64().is_finite() => {
            format!("{:.*}", precision, n.to_f64())
        }
        _ => stringifier.stringify(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(v: impl Into<Value>) -> String {
        DefaultStringifier.stringify(&v.into())
    }

    #[test]
    fn scalars() {
        assert_eq!(text(42), "42");
        assert_eq!(text(-7i64), "-7");
        assert_eq!(text(3.0), "3");
        assert_eq!(text(true), "true");
        assert_eq!(text("Maria"), "Maria");
    }

    #[test]
    fn empty_values() {
        assert_eq!(DefaultStringifier.stringify(&Value::Null), "");
        assert_eq!(text(f64::NAN), "");
    }

    #[test]
    fn infinities() {
        assert_eq!(text(f64::INFINITY), "Infinity");
        assert_eq!(text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn dates_are_calendar_dates() {
        let d = NaiveDate::from_ymd_opt(2001, 9, 11).unwrap();
        assert_eq!(text(d), "2001-09-11");
    }

    #[test]
    fn collections_are_json() {
        assert_eq!(text(vec![1, 2, 3]), "[1,2,3]");
        let map = Value::Map(vec![
            ("b".into(), Value::from(1)),
            ("a".into(), Value::Null),
        ]);
        assert_eq!(DefaultStringifier.stringify(&map), "{\"b\":1,\"a\":null}");
    }

    #[test]
    fn precision_applies_to_fractions_only() {
        let s = DefaultStringifier;
        assert_eq!(cell_text(&Value::from(1.23456), 3, &s), "1.235");
        assert_eq!(cell_text(&Value::from(2.7), 0, &s), "3");
        assert_eq!(cell_text(&Value::from(51.0), 3, &s), "51");
        assert_eq!(cell_text(&Value::from(7), 3, &s), "7");
        assert_eq!(cell_text(&Value::from(f64::NAN), 3, &s), "");
    }

    #[test]
    fn custom_stringifier_closure() {
        let upper = |v: &Value| DefaultStringifier.stringify(v).to_uppercase();
        assert_eq!(cell_text(&Value::from("abc"), 3, &upper), "ABC");
    }
}
