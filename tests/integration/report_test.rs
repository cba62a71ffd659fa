//! Integration tests: decode export files from disk and render reading lists

use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};

use reading_log::csv_handler::{
    read_file, BookRecord, FieldCodec, ReadingEntry, RecordSchema, TableDecoder,
};
use reading_log::error::ReadingLogError;
use reading_log::report::{AbsentDatePolicy, OutputFormat, ReportRenderer};

/// Helper: write `contents` to a CSV file inside a fresh temp dir
fn write_export(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("temp dir");
    let path = temp_dir.path().join("data.csv");
    std::fs::write(&path, contents).expect("write export");
    (temp_dir, path)
}

/// Helper: build a full-schema export with the given (column, value) overrides per row
fn full_export(rows: &[&[(&str, &str)]]) -> String {
    let mut out = BookRecord::COLUMNS.join(",");
    out.push('\n');
    for overrides in rows {
        let cells: Vec<String> = BookRecord::COLUMNS
            .iter()
            .map(|column| {
                let value = overrides
                    .iter()
                    .find(|(c, _)| c == column)
                    .map(|(_, v)| *v)
                    .unwrap_or("");
                format!("\"{}\"", value.replace('"', "\"\""))
            })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

const SUMMARY_EXPORT: &str = "Title,Author,Date Read,ISBN13\n\
\"Dune\",\"Frank Herbert\",\"2020/01/15\",\"=\"\"9780441013593\"\"\"\n\
\"Foo\",\"Bar\",\"\",\"\" \n";

#[test]
fn test_summary_export_end_to_end() {
    let (_dir, path) = write_export(SUMMARY_EXPORT);

    let entries = read_file::<ReadingEntry>(&path).expect("decode");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Dune");
    assert_eq!(entries[0].isbn13.get(), Some(9_780_441_013_593));
    assert_eq!(entries[1].title, "Foo");
    assert!(entries[1].date_read.is_absent());
    assert!(!entries[1].isbn13.is_set());

    let markdown = ReportRenderer::default().render_markdown(&entries);
    let dune = markdown.find("[Dune]").expect("Dune listed");
    let foo = markdown.find("[Foo]").expect("Foo listed");
    assert!(dune < foo);
    assert!(markdown.contains(
        "[Dune](https://goodreads.com/book/isbn/9780441013593) | Frank Herbert | 2020/01/15\n"
    ));
}

#[test]
fn test_newest_policy_lists_undated_first() {
    let (_dir, path) = write_export(SUMMARY_EXPORT);
    let entries = read_file::<ReadingEntry>(&path).expect("decode");

    let markdown = ReportRenderer::default()
        .with_absent_dates(AbsentDatePolicy::Newest)
        .render_markdown(&entries);
    assert!(markdown.find("[Foo]").unwrap() < markdown.find("[Dune]").unwrap());
}

#[test]
fn test_decoding_twice_is_identical() {
    let (_dir, path) = write_export(SUMMARY_EXPORT);
    let first = read_file::<ReadingEntry>(&path).expect("first decode");
    let second = read_file::<ReadingEntry>(&path).expect("second decode");
    assert_eq!(first, second);
}

#[test]
fn test_short_row_fails_whole_read() {
    let (_dir, path) = write_export(
        "Title,Author,Date Read,ISBN13\n\
         Dune,Frank Herbert,2020/01/15,1\n\
         Foo,Bar,\n\
         Baz,Qux,,\n",
    );

    let result = read_file::<ReadingEntry>(&path);
    assert!(matches!(
        result,
        Err(ReadingLogError::Shape {
            line: 3,
            expected: 4,
            actual: 3
        })
    ));
}

#[test]
fn test_summary_export_rejected_by_full_schema() {
    let (_dir, path) = write_export(SUMMARY_EXPORT);
    match read_file::<BookRecord>(&path) {
        Err(ReadingLogError::Schema { missing }) => {
            assert!(missing.contains(&"Book Id".to_string()));
            assert!(!missing.contains(&"Title".to_string()));
            assert_eq!(missing.len(), BookRecord::COLUMNS.len() - 4);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_full_export_end_to_end() {
    let contents = full_export(&[
        &[
            ("Book Id", "234225"),
            ("Title", "Dune (Dune, #1)"),
            ("Author", "Frank Herbert"),
            ("Additional Authors", "Brian Herbert,Kevin J. Anderson"),
            ("ISBN13", "=\"9780441013593\""),
            ("My Rating", "5"),
            ("Average Rating", "4.27"),
            ("Date Read", "2020/01/15"),
            ("Date Added", "2019/12/01"),
            ("Bookshelves", "sci-fi, favorites"),
            ("My Review", "Spice, \"worms\", and politics."),
        ],
        &[
            ("Book Id", "11"),
            ("Title", "The Hitchhiker's Guide to the Galaxy"),
            ("Author", "Douglas Adams"),
            ("Date Read", "2022/07/04"),
        ],
        &[("Book Id", "99"), ("Title", "Unread"), ("Author", "Someone")],
    ]);
    let (_dir, path) = write_export(&contents);

    let books = read_file::<BookRecord>(&path).expect("decode");
    assert_eq!(books.len(), 3);
    assert_eq!(books[0].additional_authors.0.len(), 2);
    assert_eq!(books[0].bookshelves.encode(), "sci-fi, favorites");
    assert_eq!(books[0].my_review, "Spice, \"worms\", and politics.");
    assert_eq!(books[0].average_rating, 4.27);
    assert_eq!(books[2].number_of_pages, 0);

    let renderer = ReportRenderer::new("books.example.org");
    let markdown = renderer
        .render(OutputFormat::Markdown, &books)
        .expect("render");
    let lines: Vec<&str> = markdown.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[2].starts_with("[The Hitchhiker's Guide to the Galaxy](https://books.example.org/book/isbn/)"));
    assert!(lines[3].starts_with("[Dune (Dune, #1)](https://books.example.org/book/isbn/9780441013593)"));
    assert!(lines[4].starts_with("[Unread]"));
}

#[test]
fn test_json_report_from_full_export() {
    let contents = full_export(&[&[
        ("Book Id", "1"),
        ("Title", "Dune"),
        ("Bookshelves", "sci-fi,favorites"),
        ("Date Read", "2020/01/15"),
    ]]);
    let (_dir, path) = write_export(&contents);
    let books = read_file::<BookRecord>(&path).expect("decode");

    let json = ReportRenderer::default()
        .render(OutputFormat::Json, &books)
        .expect("render");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["book_id"], 1);
    assert_eq!(value[0]["bookshelves"], serde_json::json!(["sci-fi", "favorites"]));
    assert_eq!(value[0]["date_read"], "2020/01/15");
    assert!(value[0]["date_added"].is_null());
}

#[test]
fn test_bad_rating_reports_column() {
    let contents = full_export(&[&[("Book Id", "1"), ("My Rating", "five")]]);
    let (_dir, path) = write_export(&contents);

    match read_file::<BookRecord>(&path) {
        Err(ReadingLogError::Format { line, column, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(column, "My Rating");
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_resource_error() {
    let temp_dir = tempdir().expect("temp dir");
    let missing = temp_dir.path().join("missing.csv");
    let result = TableDecoder::<ReadingEntry>::open(Path::new(&missing));
    assert!(matches!(result, Err(ReadingLogError::Resource { .. })));
}
