//! Tests for the default command and `expand`.

use super::parse;
use crate::cli::{Cli, CliCommand, FormatArg};
use clap::Parser;
use std::path::Path;
use unshort_core::output::OutputFormat;

#[test]
fn cli_parse_no_subcommand() {
    assert!(parse(&["unshort"]).is_none());
}

#[test]
fn cli_parse_expand_defaults() {
    match parse(&["unshort", "expand"]) {
        Some(CliCommand::Expand(args)) => {
            assert!(args.format.is_none());
            assert!(args.input.is_none());
            assert!(args.output_dir.is_none());
            assert!(!args.no_suggest);
            assert!(!args.no_progress);
        }
        _ => panic!("expected Expand"),
    }
}

#[test]
fn cli_parse_expand_all_flags() {
    match parse(&[
        "unshort",
        "expand",
        "--format",
        "csv",
        "--input",
        "links.txt",
        "--output-dir",
        "/tmp/out",
        "--no-suggest",
        "--no-progress",
    ]) {
        Some(CliCommand::Expand(args)) => {
            assert_eq!(args.format, Some(FormatArg::Csv));
            assert_eq!(args.input.as_deref(), Some(Path::new("links.txt")));
            assert_eq!(args.output_dir.as_deref(), Some(Path::new("/tmp/out")));
            assert!(args.no_suggest);
            assert!(args.no_progress);
        }
        _ => panic!("expected Expand with flags"),
    }
}

#[test]
fn cli_parse_format_aliases() {
    match parse(&["unshort", "expand", "--format", "terminal"]) {
        Some(CliCommand::Expand(args)) => assert_eq!(args.format, Some(FormatArg::Console)),
        _ => panic!("expected Expand"),
    }
    match parse(&["unshort", "expand", "--format", "txt"]) {
        Some(CliCommand::Expand(args)) => assert_eq!(args.format, Some(FormatArg::Text)),
        _ => panic!("expected Expand"),
    }
}

#[test]
fn cli_parse_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["unshort", "expand", "--format", "xml"]).is_err());
}

#[test]
fn format_arg_maps_to_output_format() {
    assert_eq!(OutputFormat::from(FormatArg::Csv), OutputFormat::Csv);
    assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
    assert_eq!(OutputFormat::from(FormatArg::Console), OutputFormat::Console);
}
