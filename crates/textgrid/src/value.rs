//! Cell values and row shapes.
//!
//! The [`Value`] enum is a closed set of cell kinds chosen when data is
//! ingested, so stringification, sorting and reduction can match on the
//! kind instead of probing it at render time. A [`Row`] is either a record
//! (ordered field name to value pairs) or a positional array.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Result, TableError};

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Missing, null or undefined.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Text value.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Ordered collection.
    List(Vec<Value>),
    /// Keyed collection, in insertion order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a NaN number.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Returns `true` for values that carry nothing to display: null, NaN,
    /// whitespace-only text and empty collections.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            Value::Text(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Bool(_) | Value::Date(_) => false,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Rank used when values of different kinds are compared.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
            Value::Date(_) => 3,
            Value::List(_) => 4,
            Value::Map(_) => 5,
            Value::Null => 6,
        }
    }

    /// Converts to a JSON value. Dates become ISO strings and NaN becomes null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(Number::I64(n)) => Json::from(*n),
            Value::Number(Number::U64(n)) => Json::from(*n),
            Value::Number(Number::F64(n)) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Text(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Compares two values for ordering.
///
/// Same-kind values compare naturally. Values of different kinds compare by
/// a fixed kind rank. NaN numbers compare equal to each other.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => a.len().cmp(&b.len()),
        (Value::Map(a), Value::Map(b)) => a.len().cmp(&b.len()),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// Numeric value.
///
/// Integers keep their exact representation so they stringify without a
/// fractional part; floats go through the configured precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for a NaN float.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Returns `true` when the number has no fractional part.
    pub fn is_integral(self) -> bool {
        match self {
            Number::I64(_) | Number::U64(_) => true,
            Number::F64(n) => n.is_finite() && n.fract() == 0.0,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// One input row.
///
/// All rows of a table share one shape. Array rows are addressed by their
/// position rendered as a string (`"0"`, `"1"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Named fields in insertion order.
    Record(Vec<(String, Value)>),
    /// Positional values.
    Array(Vec<Value>),
}

impl Row {
    /// Builds a record row from `(name, value)` pairs.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Row::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array row.
    pub fn array<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Row::Array(values.into_iter().map(Into::into).collect())
    }

    /// Builds a row from any serializable value.
    ///
    /// Structs and maps become records in field order; sequences and tuples
    /// become array rows.
    pub fn from_serialize<T: Serialize + ?Sized>(item: &T) -> Result<Self> {
        match serde_json::to_value(item)? {
            serde_json::Value::Object(map) => Ok(Row::Record(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
            serde_json::Value::Array(items) => {
                Ok(Row::Array(items.into_iter().map(Value::from).collect()))
            }
            other => Err(TableError::InvalidConfig(format!(
                "a row must serialize to an object or an array, got {}",
                other
            ))),
        }
    }

    /// Looks up a value by column identifier.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Row::Record(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Row::Array(values) => key.parse::<usize>().ok().and_then(|i| values.get(i)),
        }
    }

    /// Column identifiers in natural order.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Row::Record(fields) => fields.iter().map(|(k, _)| k.clone()).collect(),
            Row::Array(values) => (0..values.len()).map(|i| i.to_string()).collect(),
        }
    }

    /// Returns `true` if the row has a value slot for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a field, or the value at position `key` of an array row.
    /// Returns whether it existed.
    pub(crate) fn remove_field(&mut self, key: &str) -> bool {
        match self {
            Row::Record(fields) => {
                let before = fields.len();
                fields.retain(|(k, _)| k != key);
                fields.len() != before
            }
            Row::Array(values) => match key.parse::<usize>() {
                Ok(index) if index < values.len() => {
                    values.remove(index);
                    true
                }
                _ => false,
            },
        }
    }

    /// Returns `true` for array-shaped rows.
    pub fn is_array(&self) -> bool {
        matches!(self, Row::Array(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn empty_detection() {
        assert!(Value::Null.is_empty());
        assert!(Value::from(f64::NAN).is_empty());
        assert!(Value::from("   ").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn integral_numbers() {
        assert!(Number::I64(3).is_integral());
        assert!(Number::F64(3.0).is_integral());
        assert!(!Number::F64(3.5).is_integral());
        assert!(!Number::F64(f64::INFINITY).is_integral());
    }

    #[test]
    fn mixed_number_compare() {
        assert_eq!(
            Number::I64(2).compare(Number::F64(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::I64(1)), None);
    }

    #[test]
    fn compare_values_across_kinds() {
        assert_eq!(
            compare_values(&Value::from(10), &Value::from("a")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from("b"), &Value::from("a")),
            Ordering::Greater
        );
    }

    #[test]
    fn json_conversion_keeps_field_order() {
        let json = serde_json::json!({"zeta": 1, "alpha": [true, null], "mid": 2.5});
        match Value::from(json) {
            Value::Map(entries) => {
                let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
                assert_eq!(entries[0].1, Value::from(1i64));
                assert_eq!(
                    entries[1].1,
                    Value::List(vec![Value::Bool(true), Value::Null])
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn row_from_serialize_struct() {
        #[derive(Serialize)]
        struct Person {
            id: u32,
            name: &'static str,
            nickname: Option<&'static str>,
        }

        let row = Row::from_serialize(&Person {
            id: 7,
            name: "Ada",
            nickname: None,
        })
        .unwrap();

        assert_eq!(row.keys(), vec!["id", "name", "nickname"]);
        assert_eq!(row.get("id"), Some(&Value::from(7i64)));
        assert_eq!(row.get("nickname"), Some(&Value::Null));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn row_from_serialize_rejects_scalars() {
        assert!(Row::from_serialize(&42).is_err());
    }

    #[test]
    fn array_rows_use_positional_keys() {
        let row = Row::array([2, 14]);
        assert_eq!(row.keys(), vec!["0", "1"]);
        assert_eq!(row.get("1"), Some(&Value::from(14)));
        assert_eq!(row.get("2"), None);
        assert_eq!(row.get("x"), None);
    }

    #[test]
    fn remove_field_from_record() {
        let mut row = Row::record([("a", 1), ("b", 2)]);
        assert!(row.remove_field("a"));
        assert!(!row.remove_field("a"));
        assert_eq!(row.keys(), vec!["b"]);
    }

    #[test]
    fn remove_field_from_array_shifts_positions() {
        let mut row = Row::array([2, 14, 7]);
        assert!(row.remove_field("1"));
        assert_eq!(row, Row::array([2, 7]));
        assert!(!row.remove_field("2"));
        assert!(!row.remove_field("x"));
    }

    #[test]
    fn dates_become_iso_text_in_json() {
        let date = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
        assert_eq!(Value::from(date).to_json(), serde_json::json!("1990-04-02"));
    }
}
