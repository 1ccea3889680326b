use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use stencil::cli::{Args, Escape};

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("stencil")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./page.html"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template, PathBuf::from("./page.html"));
    assert_eq!(parsed.values, None);
    assert_eq!(parsed.output, None);
    assert_eq!(parsed.escape, Escape::Raw);
    assert!(!parsed.strict);
    assert!(!parsed.stdin);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--values",
        "values.yaml",
        "--strict",
        "--escape",
        "text",
        "--output",
        "out.html",
        "--verbose",
        "./page.html",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.values, Some(PathBuf::from("values.yaml")));
    assert_eq!(parsed.output, Some(PathBuf::from("out.html")));
    assert_eq!(parsed.escape, Escape::Text);
    assert!(parsed.strict);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-s", "-v", "-e", "text", "-o", "out.txt", "./page.html"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.stdin);
    assert!(parsed.verbose);
    assert_eq!(parsed.escape, Escape::Text);
    assert_eq!(parsed.output, Some(PathBuf::from("out.txt")));
}

#[test]
fn test_stdin_conflicts_with_values() {
    let args = make_args(&["--stdin", "--values", "v.json", "./page.html"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_unknown_escape() {
    let args = make_args(&["--escape", "sql", "./page.html"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_args() {
    let args = make_args(&[]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./page.html", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
