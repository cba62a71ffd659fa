use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use super::schema::{ColumnSource, RecordSchema};
use crate::error::ReadingLogError;

/// Column name to field position, resolved once from the header row.
#[derive(Debug, Clone)]
struct HeaderIndex {
    positions: HashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    /// Resolves the header against the schema's columns, listing every
    /// declared column the header lacks.
    fn resolve(header: &StringRecord, required: &[&str]) -> Result<Self, ReadingLogError> {
        let mut positions = HashMap::with_capacity(header.len());
        for (i, name) in header.iter().enumerate() {
            // First occurrence wins for duplicated names.
            positions.entry(name.to_string()).or_insert(i);
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|c| !positions.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ReadingLogError::Schema { missing });
        }

        Ok(Self {
            positions,
            width: header.len(),
        })
    }
}

/// One data row seen through the header.
struct RowView<'a> {
    header: &'a HeaderIndex,
    record: &'a StringRecord,
}

impl ColumnSource for RowView<'_> {
    fn value(&self, column: &str) -> Option<&str> {
        self.header
            .positions
            .get(column)
            .and_then(|i| self.record.get(*i))
    }
}

/// Decoder turning a delimited export into records of schema `T`.
///
/// The first line must be a header naming every column of `T` (any order,
/// extra columns allowed). Every data line must have as many fields as the
/// header. Records come out in source order.
///
/// # Example
///
/// ```rust,ignore
/// use reading_log::csv_handler::{BookRecord, TableDecoder};
/// use std::path::Path;
///
/// let books: Vec<BookRecord> = TableDecoder::open(Path::new("data.csv"))?.read_all()?;
/// ```
pub struct TableDecoder<T, R = File> {
    /// The underlying CSV reader.
    reader: Reader<R>,
    header: HeaderIndex,
    /// Reused buffer for the current data row.
    record: StringRecord,
    /// Name of the input used in error messages.
    source: String,
    /// Line of the last row read (1 is the header).
    current_line: u64,
    _schema: PhantomData<fn() -> T>,
}

impl<T: RecordSchema> TableDecoder<T, File> {
    /// Opens the export at `path` and resolves its header.
    pub fn open(path: &Path) -> Result<Self, ReadingLogError> {
        let source = path.display().to_string();
        let file = File::open(path).map_err(|e| ReadingLogError::Resource {
            path: source.clone(),
            source: e,
        })?;
        Self::from_reader(file, source)
    }
}

impl<T: RecordSchema, R: Read> TableDecoder<T, R> {
    /// Wraps any byte source; `source` names it in errors and logs.
    pub fn from_reader(input: R, source: impl Into<String>) -> Result<Self, ReadingLogError> {
        let source = source.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            // Field counts are checked per row to report a located shape error.
            .flexible(true)
            .from_reader(input);

        let header_record = reader
            .headers()
            .map_err(|e| csv_error(&source, e))?
            .clone();
        let header = HeaderIndex::resolve(&header_record, T::COLUMNS)?;
        debug!(
            source = %source,
            columns = header.width,
            "Resolved header against {} schema columns",
            T::COLUMNS.len()
        );

        Ok(Self {
            reader,
            header,
            record: StringRecord::new(),
            source,
            current_line: 1,
            _schema: PhantomData,
        })
    }

    /// Reads and decodes the next row, or `None` at end of input.
    pub fn read_next(&mut self) -> Option<Result<T, ReadingLogError>> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(csv_error(&self.source, e))),
        }

        self.current_line = self
            .record
            .position()
            .map(|p| p.line())
            .unwrap_or(self.current_line + 1);

        Some(self.decode_current())
    }

    fn decode_current(&self) -> Result<T, ReadingLogError> {
        if self.record.len() != self.header.width {
            return Err(ReadingLogError::Shape {
                line: self.current_line,
                expected: self.header.width,
                actual: self.record.len(),
            });
        }

        let row = RowView {
            header: &self.header,
            record: &self.record,
        };
        T::decode_row(&row).map_err(|e| ReadingLogError::from_row(self.current_line, e))
    }

    /// Decodes every remaining row. The first failing row aborts the read
    /// and no records are returned.
    pub fn read_all(mut self) -> Result<Vec<T>, ReadingLogError> {
        let mut records = Vec::new();
        while let Some(result) = self.read_next() {
            match result {
                Ok(record) => {
                    records.push(record);
                    debug!(line = self.current_line, decoded = records.len(), "Decoded row");
                }
                Err(e) => {
                    warn!(source = %self.source, "Decode aborted: {}", e);
                    return Err(e);
                }
            }
        }
        info!(source = %self.source, records = records.len(), "Decoded export");
        Ok(records)
    }
}

impl<T: RecordSchema, R: Read> Iterator for TableDecoder<T, R> {
    type Item = Result<T, ReadingLogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}

/// Reads every record of schema `T` from the export at `path`.
pub fn read_file<T: RecordSchema>(path: &Path) -> Result<Vec<T>, ReadingLogError> {
    TableDecoder::<T>::open(path)?.read_all()
}

fn csv_error(source: &str, err: csv::Error) -> ReadingLogError {
    if err.is_io_error() {
        ReadingLogError::Resource {
            path: source.to_string(),
            source: err.into(),
        }
    } else {
        ReadingLogError::Csv(err)
    }
}
