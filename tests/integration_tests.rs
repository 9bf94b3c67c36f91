//! Integration tests for end-to-end lexing.
//!
//! These tests drive the whole path from a source file on disk through
//! tokenization to the written `.lexer` listing.

use std::fs;

use ajs_lexer::{
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, rules::RuleTable, tokens::TokenKind},
    listing::listing::{lex_file, read_source, render_listing, ListingOptions},
    render_error,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_lex_file_writes_listing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("program.ajs");
    fs::write(&source, "let x = 0x1F;\n// note\nif (x == 31) { return tr; }\n").unwrap();

    let options = ListingOptions {
        output_dir: dir.path().join("nested").join("output"),
        ..ListingOptions::default()
    };

    let (tokens, path) = lex_file(&RuleTable::new(), &source, &options).unwrap();

    assert_eq!(path, dir.path().join("nested").join("output").join("program.lexer"));
    assert_eq!(tokens.len(), 16);

    let listing = fs::read_to_string(&path).unwrap();
    let expected = [
        "LET let",
        "STRING_IMPLICIT x",
        "= =",
        "INTEGER 31",
        "; ;",
        "IF if",
        "( (",
        "STRING_IMPLICIT x",
        "COMPARATOR ==",
        "INTEGER 31",
        ") )",
        "{ {",
        "RETURN return",
        "TR true",
        "; ;",
        "} }",
    ]
    .join("\n");
    assert_eq!(listing, expected);
}

#[test]
fn test_lex_file_missing_source() {
    let dir = tempdir().unwrap();
    let options = ListingOptions {
        output_dir: dir.path().join("output"),
        ..ListingOptions::default()
    };

    let err = lex_file(&RuleTable::new(), &dir.path().join("missing.ajs"), &options).unwrap_err();

    assert_eq!(err.get_error_name(), "SourceNotFound");
    assert!(matches!(err.get_kind(), ErrorImpl::SourceNotFound { path } if path.ends_with("missing.ajs")));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_lex_file_illegal_character_writes_nothing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("bad.ajs");
    fs::write(&source, "let a = 1;\nlet b = #;\n").unwrap();

    let options = ListingOptions {
        output_dir: dir.path().join("output"),
        ..ListingOptions::default()
    };

    let err = lex_file(&RuleTable::new(), &source, &options).unwrap_err();

    assert_eq!(err.get_kind(), &ErrorImpl::IllegalCharacter { character: '#', line: 2 });
    assert_eq!(err.get_position().1.as_str(), "bad.ajs");
    assert!(!options.listing_path(&source).exists());
}

#[test]
fn test_read_source_keeps_line_endings() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("crlf.ajs");
    fs::write(&source, "a\r\nb\r\n").unwrap();

    let contents = read_source(&source).unwrap();
    assert_eq!(contents, "a\r\nb\r\n");

    let lines: Vec<usize> = tokenize(&contents, None).unwrap().iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2]);
}

#[test]
fn test_render_listing_values() {
    let tokens = tokenize("'c' \"s\" 1.5 null fl", None).unwrap();

    assert_eq!(render_listing(&tokens), "CHAR c\nSTRING_EXPLICIT s\nREAL 1.5\nNULL null\nFL false");
    assert_eq!(render_listing(&[]), "");
}

#[test]
fn test_listing_path_uses_file_stem() {
    let options = ListingOptions::default();

    assert_eq!(
        options.listing_path(std::path::Path::new("src/demo.ajs")),
        std::path::PathBuf::from("output").join("demo.lexer")
    );
}

#[test]
fn test_render_error_for_illegal_character() {
    let source = "let ok = 1;\nlet bad = $;";
    let err = tokenize(source, Some("demo.ajs".to_string())).unwrap_err();

    let rendered = render_error(&err, source, std::path::Path::new("demo.ajs"));
    assert!(rendered.starts_with("Error: IllegalCharacter (Illegal character `$` on line 2)\n-> demo.ajs\n"));
    assert!(rendered.contains("2 | let bad = $;\n"));
    assert!(rendered.ends_with("| ----------^\n"));
}

#[test]
fn test_tokens_carry_kind_names() {
    let tokens = tokenize("character boolean type", None).unwrap();
    let names: Vec<String> = tokens.iter().map(|t| t.kind.to_string()).collect();

    assert_eq!(names, vec!["CHARACTER", "BOOLEAN", "TYPE"]);
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Identifier));
}
