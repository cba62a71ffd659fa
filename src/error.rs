//! Error module
//!
//! Defines the error types used while decoding a reading-history export and
//! rendering the report. Field codecs fail with [`FormatError`], the record
//! schema with [`RowError`], and everything that reaches the caller is a
//! [`ReadingLogError`].

use std::fmt;

use thiserror::Error;

/// A field's raw text does not match the grammar of its type.
///
/// Produced by the field codecs, which know nothing about rows or columns.
/// The record schema attaches the column name and the table decoder attaches
/// the line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// Human readable name of the expected grammar, e.g. `date (YYYY/MM/DD)`.
    pub expected: &'static str,
    /// The offending raw text.
    pub value: String,
    /// Parser message describing the failure.
    pub reason: String,
}

impl FormatError {
    pub fn new(expected: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self {
            expected,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} \"{}\": {}",
            self.expected, self.value, self.reason
        )
    }
}

impl std::error::Error for FormatError {}

/// Failure to build a record from one row's column values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// A column's text failed to decode.
    #[error("column \"{column}\": {source}")]
    Format {
        column: &'static str,
        #[source]
        source: FormatError,
    },

    /// The row mapping has no value for a column the schema declares.
    #[error("missing column \"{0}\"")]
    MissingColumn(&'static str),
}

/// The main error type for the reading log.
///
/// # Error Categories
///
/// - **Decode errors** (`Format`, `Shape`, `Schema`, `Csv`): the export is
///   readable but its content does not fit the record schema
/// - **Resource errors** (`Resource`): the export cannot be opened or read
/// - **Configuration errors** (`InvalidArgument`): rejected command-line options
#[derive(Error, Debug)]
pub enum ReadingLogError {
    /// A field's text does not match its type's grammar.
    #[error("Line {line}: column \"{column}\": {source}")]
    Format {
        /// 1-indexed line in the source; line 1 is the header.
        line: u64,
        column: &'static str,
        #[source]
        source: FormatError,
    },

    /// A data row's field count differs from the header's.
    #[error("Line {line}: expected {expected} fields but got {actual}")]
    Shape {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// Columns required by the schema are absent from the header.
    #[error("Missing column(s) in header: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The input source cannot be opened or read.
    #[error("Cannot read {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizer error that is not an I/O failure (e.g. invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ReadingLogError {
    /// Lifts a schema-level row failure to a located error.
    pub fn from_row(line: u64, err: RowError) -> Self {
        match err {
            RowError::Format { column, source } => ReadingLogError::Format {
                line,
                column,
                source,
            },
            RowError::MissingColumn(column) => ReadingLogError::Schema {
                missing: vec![column.to_string()],
            },
        }
    }

    /// Returns true for errors caused by the content of the export rather
    /// than by access to it or by configuration.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ReadingLogError::Format { .. }
                | ReadingLogError::Shape { .. }
                | ReadingLogError::Schema { .. }
                | ReadingLogError::Csv(_)
        )
    }
}
