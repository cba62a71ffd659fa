//! Field codecs for the columns of a reading-history export.
//!
//! Each column type implements [`FieldCodec`]: a total `decode` from the raw
//! cell text and an `encode` back to text. Besides the plain scalars there
//! are three export-specific kinds:
//!
//! - [`OptionalDate`]: `YYYY/MM/DD`, blank means no date
//! - [`StringList`]: comma-delimited multi-value cell
//! - [`OptionalInt`]: integer that may be blank or wrapped as `="1234"`

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::FormatError;

/// chrono pattern for the export's date columns.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Delimiter between elements of a multi-value cell.
pub const LIST_DELIMITER: &str = ",";

/// Characters some export tools wrap around numeric cells to force text
/// interpretation in spreadsheets (`="9780441013593"`).
pub const SPREADSHEET_ESCAPE_CHARS: [char; 2] = ['=', '"'];

/// Paired decode/encode rule for a column's textual representation.
///
/// `decode` must be total: any input string yields either a value or a
/// [`FormatError`], never a panic.
pub trait FieldCodec: Sized {
    /// Parses the raw cell text.
    fn decode(raw: &str) -> Result<Self, FormatError>;

    /// Formats the value as cell text.
    fn encode(&self) -> String;
}

/// A calendar date that may be unset.
///
/// Orders absent before every present date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionalDate(pub Option<NaiveDate>);

impl OptionalDate {
    pub const ABSENT: OptionalDate = OptionalDate(None);

    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    #[must_use]
    pub fn get(&self) -> Option<NaiveDate> {
        self.0
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

/// Checks the fixed `DDDD/DD/DD` shape; chrono alone accepts unpadded fields.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

impl FieldCodec for OptionalDate {
    fn decode(raw: &str) -> Result<Self, FormatError> {
        const EXPECTED: &str = "date (YYYY/MM/DD)";

        if raw.trim().is_empty() {
            return Ok(Self::ABSENT);
        }
        if !has_date_shape(raw) {
            return Err(FormatError::new(
                EXPECTED,
                raw,
                "does not match the pattern YYYY/MM/DD",
            ));
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Self::new)
            .map_err(|e| FormatError::new(EXPECTED, raw, e))
    }

    fn encode(&self) -> String {
        match self.0 {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for OptionalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for OptionalDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(_) => serializer.serialize_some(&self.encode()),
            None => serializer.serialize_none(),
        }
    }
}

/// Ordered values of a comma-delimited multi-value column, e.g. shelves or
/// co-authors. Elements are kept verbatim, including surrounding spaces, so
/// that encoding reproduces the cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FieldCodec for StringList {
    fn decode(raw: &str) -> Result<Self, FormatError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self(raw.split(LIST_DELIMITER).map(str::to_string).collect()))
    }

    fn encode(&self) -> String {
        self.0.join(LIST_DELIMITER)
    }
}

impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// An integer that may be unset, read from a cell that may carry
/// spreadsheet escaping. Encoding never re-adds the escaping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OptionalInt(pub Option<i64>);

impl OptionalInt {
    pub const UNSET: OptionalInt = OptionalInt(None);

    #[must_use]
    pub fn get(&self) -> Option<i64> {
        self.0
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl FieldCodec for OptionalInt {
    fn decode(raw: &str) -> Result<Self, FormatError> {
        let stripped: String = raw
            .chars()
            .filter(|c| !SPREADSHEET_ESCAPE_CHARS.contains(c))
            .collect();
        let digits = stripped.trim();
        if digits.is_empty() {
            return Ok(Self::UNSET);
        }
        digits
            .parse::<i64>()
            .map(|v| Self(Some(v)))
            .map_err(|e| FormatError::new("integer", raw, e))
    }

    fn encode(&self) -> String {
        self.0.map(|v| v.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for OptionalInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<i64> for OptionalInt {
    fn from(value: i64) -> Self {
        Self(Some(value))
    }
}

// Plain scalar columns. Free text is verbatim; numeric cells left blank by
// the export decode to zero.

impl FieldCodec for String {
    fn decode(raw: &str) -> Result<Self, FormatError> {
        Ok(raw.to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

macro_rules! numeric_codec {
    ($ty:ty, $expected:literal) => {
        impl FieldCodec for $ty {
            fn decode(raw: &str) -> Result<Self, FormatError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(<$ty>::default());
                }
                trimmed
                    .parse::<$ty>()
                    .map_err(|e| FormatError::new($expected, raw, e))
            }

            fn encode(&self) -> String {
                self.to_string()
            }
        }
    };
}

numeric_codec!(i32, "integer");
numeric_codec!(i64, "integer");
numeric_codec!(f32, "number");
