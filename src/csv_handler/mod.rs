//! CSV handler module
//!
//! Decodes a reading-history export into typed records.

pub mod codec;
pub mod reader;
pub mod schema;

pub use codec::{FieldCodec, OptionalDate, OptionalInt, StringList};
pub use reader::{read_file, TableDecoder};
pub use schema::{columns, BookRecord, ColumnSource, ReadingEntry, RecordSchema};
