//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! This module defines the `SchemaKind` enum choosing the record schema and
//! the `Args` struct containing all CLI arguments with validation logic.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::ReadingLogError;
use crate::report::{AbsentDatePolicy, OutputFormat, DEFAULT_CATALOG_HOST};

/// Record schema used to decode the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// Every column of the reading-history export
    #[default]
    Full,
    /// Only Title, Author, Date Read and ISBN13
    Summary,
}

/// Command-line arguments for the reading log.
///
/// Use the `validate()` method after parsing to ensure the combination is valid.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use reading_log::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "reading-log")]
#[command(about = "Render a reading-history CSV export as a Markdown reading list")]
#[command(version)]
pub struct Args {
    /// CSV export to read
    #[arg(long, default_value = "data.csv")]
    pub file: PathBuf,

    /// Host used for the catalog links of each title
    #[arg(long, default_value = DEFAULT_CATALOG_HOST)]
    pub catalog_host: String,

    /// Record schema: full export or the four report columns only
    #[arg(long, value_enum, default_value_t = SchemaKind::Full)]
    pub schema: SchemaKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Where books without a Date Read are listed: oldest (last) or newest (first)
    #[arg(long, value_enum, default_value_t = AbsentDatePolicy::Oldest)]
    pub absent_dates: AbsentDatePolicy,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--catalog-host` must be a bare host: non-empty, no `/`, no whitespace
    /// - `--output` must not overwrite the input file
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the arguments are valid
    /// - `Err(ReadingLogError::InvalidArgument)` with a descriptive message otherwise
    pub fn validate(&self) -> Result<(), ReadingLogError> {
        if self.catalog_host.is_empty() {
            return Err(ReadingLogError::InvalidArgument(
                "--catalog-host must not be empty".to_string(),
            ));
        }
        if self
            .catalog_host
            .chars()
            .any(|c| c == '/' || c.is_whitespace())
        {
            return Err(ReadingLogError::InvalidArgument(format!(
                "--catalog-host must be a bare host name, got '{}'",
                self.catalog_host
            )));
        }
        if self.output.as_ref() == Some(&self.file) {
            return Err(ReadingLogError::InvalidArgument(
                "--output must differ from --file".to_string(),
            ));
        }
        Ok(())
    }

    /// Default tracing filter directive for these arguments.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
