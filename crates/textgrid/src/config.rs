//! Table configuration.
//!
//! Configuration comes in two forms:
//!
//! - [`TableConfig`]: the partial, serde-friendly tree a caller writes by
//!   hand or loads from YAML/JSON. Every field is optional.
//! - [`ResolvedConfig`]: the immutable, fully defaulted form the layout
//!   engine reads. It is produced once by [`TableConfig::resolve`], which
//!   also parses colors and rejects inconsistent values.
//!
//! Closure-valued options (dynamic columns, highlight predicates,
//! fill-empty functions, row filters) cannot be serialized; they are set on
//! the [`Table`](crate::Table) directly.
//!
//! # Example
//!
//! ```rust
//! use textgrid::{Align, TableConfig, WidthPolicy};
//!
//! let config = TableConfig::from_yaml(r#"
//! align: right
//! padding:
//!   size: 1
//! header:
//!   uppercase: true
//!   width: stretch
//!   max_width: 20
//! body:
//!   peek: [2, 3]
//! accumulation:
//!   columns:
//!     - { column: salary, function: MEAN }
//! "#).unwrap();
//!
//! let resolved = config.resolve().unwrap();
//! assert_eq!(resolved.align, Align::Right);
//! assert_eq!(resolved.padding.size, 1);
//! assert_eq!(resolved.header.width, WidthPolicy::Stretch);
//! ```

use std::collections::BTreeMap;

use console::Color;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TableError};
use crate::style::parse_optional;
use crate::tabular::{
    AccumulationSpec, Align, BorderStyle, HeaderCase, Peek, SortSpec, Subset, WidthPolicy,
};

/// Column identifier of the origin column.
pub const ORIGIN_COLUMN: &str = "#";

const DEFAULT_STRIPE_COLOR: &str = "#444444";
const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFBA08";

/// Partial table configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Alignment of every cell.
    pub align: Option<Align>,
    /// Cell padding.
    pub padding: PaddingConfig,
    /// Border glyphs.
    pub border: BorderConfig,
    /// Header and column selection.
    pub header: HeaderConfig,
    /// Body rows.
    pub body: BodyConfig,
    /// Row ordering.
    pub sort: Option<SortSpec>,
    /// Trailing aggregate row.
    pub accumulation: AccumulationConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingConfig {
    /// Padding glyph.
    #[serde(rename = "char")]
    pub glyph: Option<char>,
    /// Glyphs on each side of a cell.
    pub size: Option<usize>,
    /// Glyph substituted in plain output.
    pub plain_char: Option<char>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderConfig {
    /// Preset supplying glyphs that are not set explicitly.
    pub style: Option<BorderStyle>,
    /// Glyph of the line drawn after each group of body rows.
    pub horizontal: Option<char>,
    /// Glyph drawn before the first column and after every column.
    pub vertical: Option<char>,
    /// Border glyph color.
    pub color: Option<String>,
    /// Body rows per horizontal border line.
    pub group_size: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Show the origin column.
    pub origin: Option<bool>,
    pub uppercase: Option<bool>,
    pub lowercase: Option<bool>,
    pub upperfirst: Option<bool>,
    /// Glyph of the line under the header; an empty string removes it.
    pub separator: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub text_color: Option<String>,
    pub bg_color: Option<String>,
    /// Backgrounds cycled across columns.
    pub bg_color_columns: Option<Vec<String>>,
    pub width: Option<WidthPolicy>,
    pub max_width: Option<usize>,
    /// Rescale to the terminal whenever the table would overflow it.
    pub fit_terminal: Option<bool>,
    /// Terminal width used instead of detection.
    pub terminal_width: Option<usize>,
    /// Header text per column identifier.
    pub display_names: BTreeMap<String, String>,
    /// Columns to show, in this order.
    #[serde(alias = "columns", deserialize_with = "column_list")]
    pub include: Option<Vec<String>>,
    #[serde(deserialize_with = "column_list")]
    pub exclude: Option<Vec<String>>,
    /// Columns placed first, in this order.
    #[serde(deserialize_with = "column_list")]
    pub order: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    /// Decimals printed for non-integral numbers.
    pub precision: Option<usize>,
    /// Alternate row background.
    pub striped: Option<bool>,
    pub stripe_color: Option<String>,
    pub text_color: Option<String>,
    pub bg_color: Option<String>,
    pub bg_color_columns: Option<Vec<String>>,
    pub peek: Option<Peek>,
    /// `[start]` or `[start, end]`.
    pub subset: Option<Vec<usize>>,
    /// Text color of highlighted cells.
    pub highlight_cell_color: Option<String>,
    /// Background of highlighted rows.
    pub highlight_row_color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccumulationConfig {
    pub columns: Option<Vec<AccumulationSpec>>,
    /// Glyph of the line above the accumulation row; an empty string removes it.
    pub separator: Option<String>,
    pub bg_color: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnKeyRaw {
    Index(u64),
    Name(String),
}

impl From<ColumnKeyRaw> for String {
    fn from(raw: ColumnKeyRaw) -> Self {
        match raw {
            ColumnKeyRaw::Index(i) => i.to_string(),
            ColumnKeyRaw::Name(s) => s,
        }
    }
}

/// Column lists accept names and array positions alike.
fn column_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<ColumnKeyRaw>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|keys| keys.into_iter().map(String::from).collect()))
}

fn separator_glyph(s: Option<&str>, default: char) -> Option<char> {
    match s {
        None => Some(default),
        Some(s) => s.chars().next(),
    }
}

fn parse_colors(list: Option<&[String]>) -> Result<Vec<Color>> {
    list.unwrap_or_default()
        .iter()
        .filter_map(|c| parse_optional(Some(c)).transpose())
        .collect()
}

impl TableConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies defaults, producing the form the layout engine reads.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let padding = Padding {
            glyph: self.padding.glyph.unwrap_or(' '),
            size: self.padding.size.unwrap_or(2),
            plain_glyph: self.padding.plain_char,
        };

        let preset = self.border.style.unwrap_or_default();
        let group_size = self.border.group_size.unwrap_or(1);
        if group_size == 0 {
            return Err(TableError::InvalidConfig(
                "border.group_size must be at least 1".into(),
            ));
        }
        let border = Border {
            horizontal: self.border.horizontal.or(preset.horizontal()),
            vertical: self.border.vertical.or(preset.vertical()),
            color: parse_optional(self.border.color.as_deref())?,
            group_size,
        };

        let h = &self.header;
        let header = HeaderOptions {
            origin: h.origin.unwrap_or(true),
            case: HeaderCase::from_flags(
                h.uppercase.unwrap_or(false),
                h.lowercase.unwrap_or(false),
                h.upperfirst.unwrap_or(false),
            ),
            separator: separator_glyph(h.separator.as_deref(), '='),
            bold: h.bold.unwrap_or(false),
            italic: h.italic.unwrap_or(false),
            underline: h.underline.unwrap_or(true),
            text_color: parse_optional(h.text_color.as_deref())?,
            bg_color: parse_optional(h.bg_color.as_deref())?,
            bg_color_columns: parse_colors(h.bg_color_columns.as_deref())?,
            width: h.width.unwrap_or_default(),
            max_width: h.max_width,
            fit_terminal: h.fit_terminal.unwrap_or(false),
            terminal_width: h.terminal_width,
            display_names: h.display_names.clone(),
            include: h.include.clone(),
            exclude: h.exclude.clone().unwrap_or_default(),
            order: h.order.clone().unwrap_or_default(),
        };

        let b = &self.body;
        let subset = match b.subset.as_deref() {
            None | Some([]) => Subset::all(),
            Some([start]) => Subset::from(*start),
            Some([start, end]) => Subset::range(*start, *end),
            Some(other) => {
                return Err(TableError::InvalidConfig(format!(
                    "body.subset takes one or two indices, got {}",
                    other.len()
                )))
            }
        };
        let body = BodyOptions {
            precision: b.precision.unwrap_or(3),
            striped: b.striped.unwrap_or(true),
            stripe_color: parse_optional(Some(
                b.stripe_color.as_deref().unwrap_or(DEFAULT_STRIPE_COLOR),
            ))?,
            text_color: parse_optional(b.text_color.as_deref())?,
            bg_color: parse_optional(b.bg_color.as_deref())?,
            bg_color_columns: parse_colors(b.bg_color_columns.as_deref())?,
            peek: b.peek,
            subset,
            highlight_cell_color: parse_optional(Some(
                b.highlight_cell_color
                    .as_deref()
                    .unwrap_or(DEFAULT_HIGHLIGHT_COLOR),
            ))?,
            highlight_row_color: parse_optional(Some(
                b.highlight_row_color
                    .as_deref()
                    .unwrap_or(DEFAULT_HIGHLIGHT_COLOR),
            ))?,
        };

        let a = &self.accumulation;
        let accumulation = AccumulationOptions {
            columns: a.columns.clone().unwrap_or_default(),
            separator: separator_glyph(a.separator.as_deref(), '-'),
            bg_color: parse_optional(a.bg_color.as_deref())?,
        };

        Ok(ResolvedConfig {
            align: self.align.unwrap_or_default(),
            padding,
            border,
            header,
            body,
            sort: self.sort.clone(),
            accumulation,
        })
    }
}

/// Fully defaulted configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub align: Align,
    pub padding: Padding,
    pub border: Border,
    pub header: HeaderOptions,
    pub body: BodyOptions,
    pub sort: Option<SortSpec>,
    pub accumulation: AccumulationOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub glyph: char,
    pub size: usize,
    pub plain_glyph: Option<char>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Border {
    pub horizontal: Option<char>,
    pub vertical: Option<char>,
    pub color: Option<Color>,
    pub group_size: usize,
}

impl Border {
    /// Characters a vertical border adds to a line of `columns` cells.
    pub fn overhead(&self, columns: usize) -> usize {
        match (self.vertical, columns) {
            (Some(_), n) if n > 0 => n + 1,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderOptions {
    pub origin: bool,
    pub case: Option<HeaderCase>,
    pub separator: Option<char>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub text_color: Option<Color>,
    pub bg_color: Option<Color>,
    pub bg_color_columns: Vec<Color>,
    pub width: WidthPolicy,
    pub max_width: Option<usize>,
    pub fit_terminal: bool,
    pub terminal_width: Option<usize>,
    pub display_names: BTreeMap<String, String>,
    pub include: Option<Vec<String>>,
    pub exclude: Vec<String>,
    pub order: Vec<String>,
}

impl HeaderOptions {
    /// Header text for a column, before padding.
    pub fn display_name(&self, column: &str) -> String {
        let name = self
            .display_names
            .get(column)
            .map(String::as_str)
            .unwrap_or(column);
        match self.case {
            Some(case) => case.apply(name),
            None => name.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyOptions {
    pub precision: usize,
    pub striped: bool,
    pub stripe_color: Option<Color>,
    pub text_color: Option<Color>,
    pub bg_color: Option<Color>,
    pub bg_color_columns: Vec<Color>,
    pub peek: Option<Peek>,
    pub subset: Subset,
    pub highlight_cell_color: Option<Color>,
    pub highlight_row_color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccumulationOptions {
    pub columns: Vec<AccumulationSpec>,
    pub separator: Option<char>,
    pub bg_color: Option<Color>,
}

impl ResolvedConfig {
    /// The same layout with every color and emphasis removed and the plain
    /// padding glyph substituted.
    pub fn plain(&self) -> ResolvedConfig {
        let mut plain = self.clone();
        if let Some(glyph) = plain.padding.plain_glyph {
            plain.padding.glyph = glyph;
        }
        plain.border.color = None;

        let h = &mut plain.header;
        h.bold = false;
        h.italic = false;
        h.underline = false;
        h.text_color = None;
        h.bg_color = None;
        h.bg_color_columns.clear();

        let b = &mut plain.body;
        b.striped = false;
        b.stripe_color = None;
        b.text_color = None;
        b.bg_color = None;
        b.bg_color_columns.clear();
        b.highlight_cell_color = None;
        b.highlight_row_color = None;

        plain.accumulation.bg_color = None;
        plain
    }

    /// Names every column the configuration refers to outside of header
    /// lists, for validation against the row shape.
    pub(crate) fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.sort
            .iter()
            .flat_map(|s| s.columns.iter())
            .chain(self.accumulation.columns.iter().map(|a| &a.column))
            .map(String::as_str)
    }
}
