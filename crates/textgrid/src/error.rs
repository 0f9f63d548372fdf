//! Error types for table layout and rendering.

use thiserror::Error;

/// Errors raised while configuring, building or rendering a table.
///
/// Every variant describes a programmer or configuration mistake. None of
/// them are recovered internally: the failing call returns the error and the
/// table stays dirty, so the next read retries the whole build.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column named in include, exclude, order, sort or accumulation
    /// lists does not exist in the row shape or among the dynamic columns.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// A fixed column width is smaller than a header's display name.
    #[error("column '{column}' is too narrow: its name does not fit in {width} characters")]
    ColumnTooNarrow { column: String, width: usize },

    /// Sort columns and sort directions have different lengths.
    #[error("sort has {columns} column(s) but {directions} direction(s)")]
    SortMismatch { columns: usize, directions: usize },

    /// A color string could not be parsed.
    #[error("invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    /// A configuration value is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A row index is out of bounds.
    #[error("row index {index} is out of range for a dataset of {len} row(s)")]
    RowOutOfRange { index: usize, len: usize },

    /// YAML configuration failed to parse.
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration or row data failed to (de)serialize.
    #[error("failed to convert JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
