//! Record schemas: which export column feeds which typed field.
//!
//! A schema declares its source columns once, in [`RecordSchema::COLUMNS`],
//! and builds a record from any [`ColumnSource`]. Column matching is exact
//! and case-sensitive; columns not named by the schema are ignored.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::Serialize;

use super::codec::{FieldCodec, OptionalDate, OptionalInt, StringList};
use crate::error::RowError;

/// Column names of the reading-history export.
pub mod columns {
    pub const BOOK_ID: &str = "Book Id";
    pub const TITLE: &str = "Title";
    pub const AUTHOR: &str = "Author";
    pub const AUTHOR_LF: &str = "Author l-f";
    pub const ADDITIONAL_AUTHORS: &str = "Additional Authors";
    pub const ISBN: &str = "ISBN";
    pub const ISBN13: &str = "ISBN13";
    pub const MY_RATING: &str = "My Rating";
    pub const AVERAGE_RATING: &str = "Average Rating";
    pub const PUBLISHER: &str = "Publisher";
    pub const BINDING: &str = "Binding";
    pub const NUMBER_OF_PAGES: &str = "Number of Pages";
    pub const YEAR_PUBLISHED: &str = "Year Published";
    pub const ORIGINAL_PUBLICATION_YEAR: &str = "Original Publication Year";
    pub const DATE_READ: &str = "Date Read";
    pub const DATE_ADDED: &str = "Date Added";
    pub const BOOKSHELVES: &str = "Bookshelves";
    pub const BOOKSHELVES_WITH_POSITIONS: &str = "Bookshelves with positions";
    pub const EXCLUSIVE_SHELF: &str = "Exclusive Shelf";
    pub const MY_REVIEW: &str = "My Review";
    pub const SPOILER: &str = "Spoiler";
    pub const PRIVATE_NOTES: &str = "Private Notes";
    pub const READ_COUNT: &str = "Read Count";
    pub const RECOMMENDED_FOR: &str = "Recommended For";
    pub const RECOMMENDED_BY: &str = "Recommended By";
    pub const OWNED_COPIES: &str = "Owned Copies";
    pub const ORIGINAL_PURCHASE_DATE: &str = "Original Purchase Date";
    pub const ORIGINAL_PURCHASE_LOCATION: &str = "Original Purchase Location";
    pub const CONDITION: &str = "Condition";
    pub const CONDITION_DESCRIPTION: &str = "Condition Description";
    pub const BCID: &str = "BCID";
}

use columns::*;

/// Lookup of one row's cell text by column name.
pub trait ColumnSource {
    fn value(&self, column: &str) -> Option<&str>;
}

impl<S: BuildHasher> ColumnSource for HashMap<String, String, S> {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl<S: BuildHasher> ColumnSource for HashMap<&str, &str, S> {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column).copied()
    }
}

/// A record type decodable from named columns.
pub trait RecordSchema: Sized {
    /// Every source column, in declaration order. Each field has exactly one.
    const COLUMNS: &'static [&'static str];

    /// Builds a record from one row, stopping at the first failing field.
    fn decode_row<S: ColumnSource + ?Sized>(row: &S) -> Result<Self, RowError>;
}

/// Decodes one declared column with the codec of the target type.
fn field<T, S>(row: &S, column: &'static str) -> Result<T, RowError>
where
    T: FieldCodec,
    S: ColumnSource + ?Sized,
{
    let raw = row
        .value(column)
        .ok_or(RowError::MissingColumn(column))?;
    T::decode(raw).map_err(|source| RowError::Format { column, source })
}

/// One book of the full reading-history export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub author_lf: String,
    pub additional_authors: StringList,
    /// ISBN-10 as exported, which may keep spreadsheet escaping and an `X`
    /// check digit.
    pub isbn: String,
    pub isbn13: OptionalInt,
    pub my_rating: f32,
    pub average_rating: f32,
    pub publisher: String,
    pub binding: String,
    pub number_of_pages: i32,
    pub year_published: i32,
    pub original_publication_year: i32,
    pub date_read: OptionalDate,
    pub date_added: OptionalDate,
    pub bookshelves: StringList,
    pub bookshelves_with_positions: StringList,
    pub exclusive_shelf: String,
    pub my_review: String,
    pub spoiler: String,
    pub private_notes: String,
    pub read_count: i32,
    pub recommended_for: String,
    pub recommended_by: String,
    pub owned_copies: i32,
    pub original_purchase_date: OptionalDate,
    pub original_purchase_location: String,
    pub condition: String,
    pub condition_description: String,
    pub bcid: String,
}

impl RecordSchema for BookRecord {
    const COLUMNS: &'static [&'static str] = &[
        BOOK_ID,
        TITLE,
        AUTHOR,
        AUTHOR_LF,
        ADDITIONAL_AUTHORS,
        ISBN,
        ISBN13,
        MY_RATING,
        AVERAGE_RATING,
        PUBLISHER,
        BINDING,
        NUMBER_OF_PAGES,
        YEAR_PUBLISHED,
        ORIGINAL_PUBLICATION_YEAR,
        DATE_READ,
        DATE_ADDED,
        BOOKSHELVES,
        BOOKSHELVES_WITH_POSITIONS,
        EXCLUSIVE_SHELF,
        MY_REVIEW,
        SPOILER,
        PRIVATE_NOTES,
        READ_COUNT,
        RECOMMENDED_FOR,
        RECOMMENDED_BY,
        OWNED_COPIES,
        ORIGINAL_PURCHASE_DATE,
        ORIGINAL_PURCHASE_LOCATION,
        CONDITION,
        CONDITION_DESCRIPTION,
        BCID,
    ];

    fn decode_row<S: ColumnSource + ?Sized>(row: &S) -> Result<Self, RowError> {
        Ok(Self {
            book_id: field(row, BOOK_ID)?,
            title: field(row, TITLE)?,
            author: field(row, AUTHOR)?,
            author_lf: field(row, AUTHOR_LF)?,
            additional_authors: field(row, ADDITIONAL_AUTHORS)?,
            isbn: field(row, ISBN)?,
            isbn13: field(row, ISBN13)?,
            my_rating: field(row, MY_RATING)?,
            average_rating: field(row, AVERAGE_RATING)?,
            publisher: field(row, PUBLISHER)?,
            binding: field(row, BINDING)?,
            number_of_pages: field(row, NUMBER_OF_PAGES)?,
            year_published: field(row, YEAR_PUBLISHED)?,
            original_publication_year: field(row, ORIGINAL_PUBLICATION_YEAR)?,
            date_read: field(row, DATE_READ)?,
            date_added: field(row, DATE_ADDED)?,
            bookshelves: field(row, BOOKSHELVES)?,
            bookshelves_with_positions: field(row, BOOKSHELVES_WITH_POSITIONS)?,
            exclusive_shelf: field(row, EXCLUSIVE_SHELF)?,
            my_review: field(row, MY_REVIEW)?,
            spoiler: field(row, SPOILER)?,
            private_notes: field(row, PRIVATE_NOTES)?,
            read_count: field(row, READ_COUNT)?,
            recommended_for: field(row, RECOMMENDED_FOR)?,
            recommended_by: field(row, RECOMMENDED_BY)?,
            owned_copies: field(row, OWNED_COPIES)?,
            original_purchase_date: field(row, ORIGINAL_PURCHASE_DATE)?,
            original_purchase_location: field(row, ORIGINAL_PURCHASE_LOCATION)?,
            condition: field(row, CONDITION)?,
            condition_description: field(row, CONDITION_DESCRIPTION)?,
            bcid: field(row, BCID)?,
        })
    }
}

/// The four columns the reading list needs; accepts trimmed-down exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingEntry {
    pub title: String,
    pub author: String,
    pub date_read: OptionalDate,
    pub isbn13: OptionalInt,
}

impl RecordSchema for ReadingEntry {
    const COLUMNS: &'static [&'static str] = &[TITLE, AUTHOR, DATE_READ, ISBN13];

    fn decode_row<S: ColumnSource + ?Sized>(row: &S) -> Result<Self, RowError> {
        Ok(Self {
            title: field(row, TITLE)?,
            author: field(row, AUTHOR)?,
            date_read: field(row, DATE_READ)?,
            isbn13: field(row, ISBN13)?,
        })
    }
}

impl From<BookRecord> for ReadingEntry {
    fn from(book: BookRecord) -> Self {
        Self {
            title: book.title,
            author: book.author,
            date_read: book.date_read,
            isbn13: book.isbn13,
        }
    }
}
