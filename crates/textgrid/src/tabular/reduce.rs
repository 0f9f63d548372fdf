//! Column reductions for the accumulation row.
//!
//! [`StatsReducer`] is the default [`Reducer`]. Nulls and NaN are skipped
//! before any function runs, and an input with nothing left yields
//! [`Value::Null`] for every function, `COUNT` and `SUM` included.
//! Numeric functions ignore non-numeric values; `MIN`, `MAX`, `MODE` and
//! `ANTIMODE` work on any kind.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::{compare_values, Number, Value};

use super::stringify::DefaultStringifier;
use super::traits::{Reducer, Stringifier};

/// Reduction applied to a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionTag {
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Sum.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Median; the mean of the two middle values for even counts.
    Median,
    /// Population variance.
    #[serde(alias = "VAR")]
    Variance,
    /// Population standard deviation.
    #[serde(alias = "STD")]
    StdDev,
    /// Difference between the largest and smallest value.
    Range,
    /// Number of non-empty values.
    Count,
    /// Most frequent value; the later value wins a tie.
    #[serde(alias = "FREQ")]
    Mode,
    /// Least frequent value; the later value wins a tie.
    #[serde(alias = "INFREQ")]
    Antimode,
    /// Geometric mean.
    #[serde(alias = "GEO_MEAN")]
    GeometricMean,
    /// Harmonic mean.
    #[serde(alias = "HARM_MEAN")]
    HarmonicMean,
}

impl FunctionTag {
    /// All reductions, in declaration order.
    pub const ALL: [FunctionTag; 13] = [
        FunctionTag::Min,
        FunctionTag::Max,
        FunctionTag::Sum,
        FunctionTag::Mean,
        FunctionTag::Median,
        FunctionTag::Variance,
        FunctionTag::StdDev,
        FunctionTag::Range,
        FunctionTag::Count,
        FunctionTag::Mode,
        FunctionTag::Antimode,
        FunctionTag::GeometricMean,
        FunctionTag::HarmonicMean,
    ];
}

/// The built-in [`Reducer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsReducer;

impl Reducer for StatsReducer {
    fn reduce(&self, values: &[Value], tag: FunctionTag) -> Value {
        let present: Vec<&Value> = values.iter().filter(|v| !v.is_empty()).collect();
        if present.is_empty() {
            return Value::Null;
        }

        match tag {
            FunctionTag::Min => extreme(&present, Ordering::Less),
            FunctionTag::Max => extreme(&present, Ordering::Greater),
            FunctionTag::Count => Value::from(present.len()),
            FunctionTag::Mode => by_frequency(&present, |count, best| count >= best),
            FunctionTag::Antimode => by_frequency(&present, |count, best| count <= best),
            numeric => {
                let nums: Vec<f64> = present
                    .iter()
                    .filter_map(|v| v.as_number())
                    .map(Number::to_f64)
                    .collect();
                if nums.is_empty() {
                    return Value::Null;
                }
                reduce_numbers(&nums, numeric)
                    .map(Value::from)
                    .unwrap_or(Value::Null)
            }
        }
    }
}

fn extreme(values: &[&Value], wanted: Ordering) -> Value {
    let mut best = values[0];
    for &v in &values[1..] {
        if compare_values(v, best) == wanted {
            best = v;
        }
    }
    best.clone()
}

fn by_frequency(values: &[&Value], replaces: impl Fn(usize, usize) -> bool) -> Value {
    // (display key, first value seen with that key, count), in first-seen order
    let mut tally: Vec<(String, &Value, usize)> = Vec::new();
    for &v in values {
        let key = DefaultStringifier.stringify(v);
        match tally.iter_mut().find(|(k, _, _)| *k == key) {
            Some(entry) => entry.2 += 1,
            None => tally.push((key, v, 1)),
        }
    }

    let mut chosen = tally[0].1;
    let mut best = tally[0].2;
    for &(_, v, count) in &tally[1..] {
        if replaces(count, best) {
            chosen = v;
            best = count;
        }
    }
    chosen.clone()
}

fn reduce_numbers(nums: &[f64], tag: FunctionTag) -> Option<f64> {
    let n = nums.len() as f64;
    let sum: f64 = nums.iter().sum();
    let mean = sum / n;
    let variance = || nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let result = match tag {
        FunctionTag::Sum => sum,
        FunctionTag::Mean => mean,
        FunctionTag::Median => {
            let mut sorted = nums.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let middle = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[middle - 1] + sorted[middle]) / 2.0
            } else {
                sorted[middle]
            }
        }
        FunctionTag::Variance => variance(),
        FunctionTag::StdDev => variance().sqrt(),
        FunctionTag::Range => {
            let min = nums.iter().copied().fold(f64::INFINITY, f64::min);
            let max = nums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            max - min
        }
        FunctionTag::GeometricMean => {
            if nums.iter().any(|x| *x < 0.0) {
                return None;
            }
            if nums.iter().any(|x| *x == 0.0) {
                return Some(0.0);
            }
            (nums.iter().map(|x| x.ln()).sum::<f64>() / n).exp()
        }
        FunctionTag::HarmonicMean => {
            if nums.iter().any(|x| *x == 0.0) {
                return None;
            }
            n / nums.iter().map(|x| 1.0 / x).sum::<f64>()
        }
        FunctionTag::Min
        | FunctionTag::Max
        | FunctionTag::Count
        | FunctionTag::Mode
        | FunctionTag::Antimode => return None,
    };

    result.is_finite().then_some(result)
}
