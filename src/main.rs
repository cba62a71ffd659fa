//! Reading Log - render a reading-history export as a reading list
//!
//! Reads a CSV export (one row per book), decodes it into typed records and
//! prints a Markdown table of the books, most recently read first, each title
//! linking to its catalog page.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 2 | Decode error (bad field, row shape or missing column) |
//! | 3 | File I/O error |
//! | 4 | Report rendering error (JSON serialization) |

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use reading_log::cli::{Args, SchemaKind};
use reading_log::csv_handler::{read_file, BookRecord, ReadingEntry, RecordSchema};
use reading_log::error::ReadingLogError;
use reading_log::report::{Listing, ReportRenderer};
use serde::Serialize;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for malformed export content
const EXIT_DECODE_ERROR: u8 = 2;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for report serialization failures
const EXIT_RENDER_ERROR: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, ReadingLogError::InvalidArgument(_)) {
                eprintln!("  Hint: Use --help for usage information");
            }
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Validates the arguments, decodes the export with the chosen schema and
/// writes the report.
fn run(args: &Args) -> Result<(), ReadingLogError> {
    args.validate()?;

    let renderer =
        ReportRenderer::new(args.catalog_host.as_str()).with_absent_dates(args.absent_dates);

    let report = match args.schema {
        SchemaKind::Full => render_file::<BookRecord>(args, &renderer)?,
        SchemaKind::Summary => render_file::<ReadingEntry>(args, &renderer)?,
    };

    match &args.output {
        Some(path) => std::fs::write(path, report).map_err(|e| ReadingLogError::Resource {
            path: path.display().to_string(),
            source: e,
        })?,
        None => print!("{}", report),
    }
    Ok(())
}

fn render_file<T>(args: &Args, renderer: &ReportRenderer) -> Result<String, ReadingLogError>
where
    T: RecordSchema + Listing + Serialize,
{
    let records = read_file::<T>(&args.file)?;
    renderer.render(args.format, &records)
}

/// Maps an error to the process exit code.
fn error_to_exit_code(error: &ReadingLogError) -> u8 {
    match error {
        ReadingLogError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        ReadingLogError::Resource { .. } => EXIT_IO_ERROR,
        ReadingLogError::Json(_) => EXIT_RENDER_ERROR,
        e => {
            debug_assert!(e.is_decode_error());
            EXIT_DECODE_ERROR
        }
    }
}
