//! Core types for table layout configuration.
//!
//! This module defines the small value types shared by the configuration
//! layer and the layout passes: alignment, width policy, header case,
//! sort direction, peek and subset ranges.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::reduce::FunctionTag;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    #[serde(alias = "LEFT")]
    Left,
    /// Right-align text (pad on the left).
    #[serde(alias = "RIGHT")]
    Right,
    /// Center text (pad on both sides).
    #[serde(alias = "CENTER")]
    Center,
}

impl Align {
    /// Splits `fill` spare characters into `(left, right)` padding counts.
    ///
    /// Center puts the odd remainder on the right.
    pub fn split(self, fill: usize) -> (usize, usize) {
        match self {
            Align::Left => (0, fill),
            Align::Right => (fill, 0),
            Align::Center => (fill / 2, fill / 2 + fill % 2),
        }
    }
}

/// How column widths are negotiated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WidthRaw", into = "WidthRaw")]
pub enum WidthPolicy {
    /// Every column, the origin column included, gets exactly this width.
    Fixed(usize),
    /// Each column is as wide as its widest text.
    #[default]
    Auto,
    /// Auto widths rescaled proportionally to fill the terminal.
    Stretch,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthRaw {
    Fixed(usize),
    StringVariant(String),
}

impl From<WidthPolicy> for WidthRaw {
    fn from(width: WidthPolicy) -> Self {
        match width {
            WidthPolicy::Fixed(w) => WidthRaw::Fixed(w),
            WidthPolicy::Auto => WidthRaw::StringVariant("auto".to_string()),
            WidthPolicy::Stretch => WidthRaw::StringVariant("stretch".to_string()),
        }
    }
}

impl TryFrom<WidthRaw> for WidthPolicy {
    type Error = String;

    fn try_from(raw: WidthRaw) -> Result<Self, Self::Error> {
        match raw {
            WidthRaw::Fixed(w) => Ok(WidthPolicy::Fixed(w)),
            WidthRaw::StringVariant(s) if s.eq_ignore_ascii_case("auto") => Ok(WidthPolicy::Auto),
            WidthRaw::StringVariant(s) if s.eq_ignore_ascii_case("stretch") => {
                Ok(WidthPolicy::Stretch)
            }
            WidthRaw::StringVariant(s) => Err(format!(
                "Invalid width: '{}'. Expected a number, 'auto' or 'stretch'.",
                s
            )),
        }
    }
}

/// Case transform applied to header names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderCase {
    /// `FIRSTNAME`
    Upper,
    /// `firstname`
    Lower,
    /// `Firstname`
    UpperFirst,
}

impl HeaderCase {
    /// Picks the transform from three flags, in priority order
    /// uppercase, lowercase, upperfirst.
    pub fn from_flags(uppercase: bool, lowercase: bool, upperfirst: bool) -> Option<Self> {
        if uppercase {
            Some(HeaderCase::Upper)
        } else if lowercase {
            Some(HeaderCase::Lower)
        } else if upperfirst {
            Some(HeaderCase::UpperFirst)
        } else {
            None
        }
    }

    /// Applies the transform.
    pub fn apply(self, name: &str) -> String {
        match self {
            HeaderCase::Upper => name.to_uppercase(),
            HeaderCase::Lower => name.to_lowercase(),
            HeaderCase::UpperFirst => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "DESC")]
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort specification: parallel lists of columns and directions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    /// Columns, most significant first.
    pub columns: Vec<String>,
    /// One direction per column.
    pub directions: Vec<Dir>,
}

/// Head/tail display mode.
///
/// In YAML, `peek: 2` is symmetric and `peek: [1, 3]` is a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Peek {
    /// Show `p` rows at each end.
    Symmetric(usize),
    /// Show `low` leading rows and `high` trailing rows.
    Range(usize, usize),
}

impl Peek {
    /// Returns `(low, high)` if peeking elides anything for `row_count` rows.
    pub fn bounds(self, row_count: usize) -> Option<(usize, usize)> {
        let (low, high) = match self {
            Peek::Symmetric(p) => (p, p),
            Peek::Range(low, high) => (low, high),
        };
        let shown = low.checked_add(high)?;
        if shown >= row_count {
            return None;
        }
        if let Peek::Symmetric(0) = self {
            return None;
        }
        Some((low, high))
    }
}

/// Row range kept by the materializer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subset {
    /// First kept row.
    pub start: usize,
    /// One past the last kept row; `None` keeps everything from `start`.
    pub end: Option<usize>,
}

impl Subset {
    /// Keeps every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keeps rows from `start` onward.
    pub fn from(start: usize) -> Self {
        Subset { start, end: None }
    }

    /// Keeps rows `[start, end)`.
    pub fn range(start: usize, end: usize) -> Self {
        Subset {
            start,
            end: Some(end),
        }
    }

    /// Clamped index range for a dataset of `len` rows.
    pub fn clamp(self, len: usize) -> std::ops::Range<usize> {
        let end = self.end.unwrap_or(len).min(len);
        let start = self.start.min(end);
        start..end
    }
}

/// One accumulation entry: reduce `column` with `function`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationSpec {
    /// Column to reduce.
    pub column: String,
    /// Reduction to apply.
    pub function: FunctionTag,
}

impl AccumulationSpec {
    /// Creates an accumulation entry.
    pub fn new(column: impl Into<String>, function: FunctionTag) -> Self {
        AccumulationSpec {
            column: column.into(),
            function,
        }
    }
}
