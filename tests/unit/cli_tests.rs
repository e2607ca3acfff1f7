//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use csvdiff::cli::{Cli, OutputFormat};
use csvdiff::{CsvDiffError, LengthMismatchPolicy};
use std::path::PathBuf;

#[test]
fn test_cli_two_files() {
    let cli = Cli::try_parse_from(["csvdiff", "old.csv", "new.csv"]).unwrap();
    assert_eq!(cli.file1, PathBuf::from("old.csv"));
    assert_eq!(cli.file2, PathBuf::from("new.csv"));
    assert_eq!(cli.key_column, 1);
    assert_eq!(cli.on_length_mismatch, LengthMismatchPolicy::Fail);
    assert_eq!(cli.format, OutputFormat::Log);
    assert!(!cli.verbose);
}

#[test]
fn test_cli_missing_argument() {
    let result = Cli::try_parse_from(["csvdiff", "only.csv"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_no_arguments() {
    let result = Cli::try_parse_from(["csvdiff"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_too_many_arguments() {
    let result = Cli::try_parse_from(["csvdiff", "a.csv", "b.csv", "c.csv"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_usage_names_program() {
    let err = Cli::try_parse_from(["csvdiff", "a.csv"]).unwrap_err();
    assert!(err.to_string().contains("csvdiff"));
}

#[test]
fn test_cli_options() {
    let cli = Cli::try_parse_from([
        "csvdiff",
        "a.csv",
        "b.csv",
        "--key-column",
        "0",
        "--on-length-mismatch",
        "report",
        "--format",
        "json",
        "--show-missing",
        "-v",
    ])
    .unwrap();

    let options = cli.diff_options();
    assert_eq!(options.key_column, 0);
    assert_eq!(options.length_mismatch, LengthMismatchPolicy::Report);
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.show_missing);
    assert!(cli.verbose);
}

#[test]
fn test_cli_short_key_flag() {
    let cli = Cli::try_parse_from(["csvdiff", "-k", "3", "a.csv", "b.csv"]).unwrap();
    assert_eq!(cli.key_column, 3);
}

#[test]
fn test_cli_invalid_values() {
    assert!(Cli::try_parse_from(["csvdiff", "a.csv", "b.csv", "--key-column", "-1"]).is_err());
    assert!(Cli::try_parse_from(["csvdiff", "a.csv", "b.csv", "--key-column", "abc"]).is_err());
    assert!(Cli::try_parse_from(["csvdiff", "a.csv", "b.csv", "--format", "xml"]).is_err());
    assert!(
        Cli::try_parse_from(["csvdiff", "a.csv", "b.csv", "--on-length-mismatch", "ignore"])
            .is_err()
    );
}

#[test]
fn test_cli_error_becomes_usage_error() {
    let err = CsvDiffError::from(Cli::try_parse_from(["csvdiff", "a.csv"]).unwrap_err());
    match err {
        CsvDiffError::Usage { message } => assert!(message.contains("csvdiff")),
        other => panic!("Expected Usage error, got {:?}", other),
    }
}
