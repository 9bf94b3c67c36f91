#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod listing;
pub mod macros;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub usize, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

static TRACING_INIT: Once = Once::new();

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=ajs_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Finds the line holding byte `position`.
///
/// Returns the 1-based line number, the line text without its terminator and
/// the column inside that line. `\r\n`, `\r` and `\n` all end a line.
pub fn get_line_at_position(source: &str, position: usize) -> Option<(usize, String, usize)> {
    if position > source.len() {
        return None;
    }

    let bytes = source.as_bytes();
    let mut start = 0;
    let mut line_number = 1;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' || bytes[i] == b'\r' {
            let terminator_end = if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i + 2
            } else {
                i + 1
            };

            if position < terminator_end {
                return Some((line_number, String::from(&source[start..i]), position - start));
            }

            start = terminator_end;
            line_number += 1;
            i = terminator_end;
            continue;
        }
        i += 1;
    }

    Some((line_number, String::from(&source[start..]), position - start))
}

/// Renders a caret diagnostic for `error` against the scanned text.
pub fn render_error(error: &Error, source: &str, file: &Path) -> String {
    /*
        Error: IllegalCharacter (Illegal character `@` on line 2)
        -> main.ajs
           |
         2 | let a = @;
           | --------^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));

    if source.is_empty() {
        return out;
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file: &Path) {
    eprint!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
