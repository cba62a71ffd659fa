//! Property-based tests for CLI argument parsing

use clap::Parser;
use proptest::prelude::*;
use std::path::PathBuf;

use reading_log::cli::{Args, SchemaKind};
use reading_log::report::{AbsentDatePolicy, OutputFormat};

/// Strategy for generating valid host strings
fn valid_host_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9]{0,10}".prop_map(|s| s),
        "[a-z][a-z0-9]{0,5}\\.[a-z]{2,4}".prop_map(|s| s),
        "[a-z]{1,5}\\.[a-z][a-z0-9-]{0,8}\\.[a-z]{2,3}".prop_map(|s| s),
        Just("localhost:8080".to_string()),
    ]
}

/// Strategy for generating hosts carrying a scheme or path
fn host_with_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "https://[a-z]{1,10}\\.com".prop_map(|s| s),
        "[a-z]{1,10}\\.com/[a-z]{1,5}".prop_map(|s| s),
        "[a-z]{1,5} [a-z]{1,5}".prop_map(|s| s),
    ]
}

/// Strategy for generating valid file paths
fn valid_file_path_strategy() -> impl Strategy<Value = PathBuf> {
    "[a-z][a-z0-9_]{0,10}\\.csv".prop_map(PathBuf::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any bare host name parses and validates.
    #[test]
    fn valid_catalog_host_accepted(host in valid_host_strategy()) {
        let args = Args::try_parse_from(["reading-log", "--catalog-host", host.as_str()]).unwrap();
        prop_assert_eq!(&args.catalog_host, &host);
        prop_assert!(args.validate().is_ok());
    }

    // Hosts with a scheme, path or whitespace are rejected by validation.
    #[test]
    fn catalog_host_with_path_rejected(host in host_with_path_strategy()) {
        let args = Args::try_parse_from(["reading-log", "--catalog-host", host.as_str()]).unwrap();
        prop_assert!(args.validate().is_err());
    }

    // Distinct input and output paths are accepted; equal ones are not.
    #[test]
    fn output_must_differ_from_input(input in valid_file_path_strategy(), output in valid_file_path_strategy()) {
        let args = Args::try_parse_from([
            "reading-log".to_string(),
            "--file".to_string(),
            input.display().to_string(),
            "--output".to_string(),
            output.display().to_string(),
        ])
        .unwrap();
        prop_assert_eq!(args.validate().is_ok(), input != output);
    }

    // Every combination of enum flags parses.
    #[test]
    fn enum_flags_parse(
        schema in prop_oneof![Just("full"), Just("summary")],
        format in prop_oneof![Just("markdown"), Just("json")],
        absent in prop_oneof![Just("oldest"), Just("newest")],
    ) {
        let args = Args::try_parse_from([
            "reading-log", "--schema", schema, "--format", format, "--absent-dates", absent,
        ])
        .unwrap();
        prop_assert_eq!(args.schema == SchemaKind::Summary, schema == "summary");
        prop_assert_eq!(args.format == OutputFormat::Json, format == "json");
        prop_assert_eq!(args.absent_dates == AbsentDatePolicy::Newest, absent == "newest");
    }
}
