//! Report rendering
//!
//! Turns decoded records into a reading list: a Markdown table linking each
//! title to its catalog page, or a JSON dump of the same sorted records.
//! Rows are ordered by Date Read, most recent first.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Serialize;

use crate::csv_handler::{BookRecord, OptionalDate, OptionalInt, ReadingEntry};
use crate::error::ReadingLogError;

/// Catalog host used when none is configured.
pub const DEFAULT_CATALOG_HOST: &str = "goodreads.com";

const MARKDOWN_HEADER: &str = "Title | Author | Date Read\n------|--------|-----------\n";

/// The fields a record needs to appear in the reading list.
pub trait Listing {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn date_read(&self) -> OptionalDate;
    fn isbn13(&self) -> OptionalInt;
}

impl Listing for BookRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn date_read(&self) -> OptionalDate {
        self.date_read
    }

    fn isbn13(&self) -> OptionalInt {
        self.isbn13
    }
}

impl Listing for ReadingEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn date_read(&self) -> OptionalDate {
        self.date_read
    }

    fn isbn13(&self) -> OptionalInt {
        self.isbn13
    }
}

/// Where records without a Date Read land in the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AbsentDatePolicy {
    /// Treat an absent date as the earliest possible date (listed last).
    #[default]
    Oldest,
    /// Treat an absent date as the latest possible date (listed first).
    Newest,
}

/// Output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown table
    #[default]
    Markdown,
    /// Pretty-printed JSON array
    Json,
}

/// Renders sorted reading lists.
///
/// # Example
///
/// ```rust,ignore
/// use reading_log::report::{AbsentDatePolicy, ReportRenderer};
///
/// let renderer = ReportRenderer::new("goodreads.com").with_absent_dates(AbsentDatePolicy::Oldest);
/// print!("{}", renderer.render_markdown(&books));
/// ```
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    catalog_host: String,
    absent_dates: AbsentDatePolicy,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_HOST)
    }
}

impl ReportRenderer {
    pub fn new(catalog_host: impl Into<String>) -> Self {
        Self {
            catalog_host: catalog_host.into(),
            absent_dates: AbsentDatePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_absent_dates(mut self, policy: AbsentDatePolicy) -> Self {
        self.absent_dates = policy;
        self
    }

    /// Orders Date Read descending. Ties keep source order.
    fn compare(&self, a: OptionalDate, b: OptionalDate) -> Ordering {
        match (a.get(), b.get()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match self.absent_dates {
                AbsentDatePolicy::Oldest => Ordering::Greater,
                AbsentDatePolicy::Newest => Ordering::Less,
            },
            (Some(_), None) => match self.absent_dates {
                AbsentDatePolicy::Oldest => Ordering::Less,
                AbsentDatePolicy::Newest => Ordering::Greater,
            },
        }
    }

    /// Returns the records in report order without copying them.
    pub fn sort<'a, R: Listing>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut sorted: Vec<&R> = records.iter().collect();
        sorted.sort_by(|a, b| self.compare(a.date_read(), b.date_read()));
        sorted
    }

    /// Catalog page for a book; an unset ISBN13 leaves the path open.
    #[must_use]
    pub fn catalog_url(&self, isbn13: OptionalInt) -> String {
        format!("https://{}/book/isbn/{}", self.catalog_host, isbn13)
    }

    pub fn render_markdown<R: Listing>(&self, records: &[R]) -> String {
        let mut out = String::from(MARKDOWN_HEADER);
        for record in self.sort(records) {
            out.push_str(&format!(
                "[{}]({}) | {} | {}\n",
                escape_link_text(record.title()),
                self.catalog_url(record.isbn13()),
                escape_cell(record.author()),
                record.date_read(),
            ));
        }
        out
    }

    pub fn render_json<R: Listing + Serialize>(
        &self,
        records: &[R],
    ) -> Result<String, ReadingLogError> {
        let mut json = serde_json::to_string_pretty(&self.sort(records))?;
        json.push('\n');
        Ok(json)
    }

    pub fn render<R: Listing + Serialize>(
        &self,
        format: OutputFormat,
        records: &[R],
    ) -> Result<String, ReadingLogError> {
        match format {
            OutputFormat::Markdown => Ok(self.render_markdown(records)),
            OutputFormat::Json => self.render_json(records),
        }
    }
}

/// Keeps a value inside one Markdown table cell.
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Keeps a title inside the link text of its cell.
fn escape_link_text(value: &str) -> String {
    escape_cell(value).replace('[', "\\[").replace(']', "\\]")
}
