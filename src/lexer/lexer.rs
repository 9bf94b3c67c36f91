use std::rc::Rc;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::{rules::{RuleKind, RuleTable}, tokens::Token};

/// One matched stretch of input: a token, or discarded trivia.
#[derive(Debug, Clone)]
pub struct Segment {
    pub rule: RuleKind,
    pub start: usize,
    pub end: usize,
    pub token: Option<Token>,
}

/// A single-use scan session over one source text.
///
/// Yields tokens in order and stops after the first error. A new session is
/// needed to scan the same text again.
pub struct Lexer<'a> {
    table: &'a RuleTable,
    source: &'a str,
    pos: usize,
    line: usize,
    file: Rc<String>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(table: &'a RuleTable, source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            table,
            source,
            pos: 0,
            line: 1,
            file: file_name,
            finished: false,
        }
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset, Rc::clone(&self.file))
    }

    fn advance_n(&mut self, n: usize) {
        self.line += count_line_breaks(&self.source[self.pos..self.pos + n]);
        self.pos += n;
    }

    fn fail(&mut self, error: ErrorImpl) -> Error {
        self.finished = true;
        tracing::debug!(file = %self.file, offset = self.pos, line = self.line, %error, "scan failed");
        Error::new(error, self.position_at(self.pos))
    }

    /// Matches the next stretch of input, including whitespace and comments.
    pub fn next_segment(&mut self) -> Option<Result<Segment, Error>> {
        if self.finished {
            return None;
        }

        if self.at_eof() {
            self.finished = true;
            tracing::debug!(file = %self.file, lines = self.line, "scan finished");
            return None;
        }

        let table = self.table;
        let remaining = self.remainder();
        let Some((pattern, len)) = table.first_match(remaining) else {
            let character = self.at().unwrap_or('\0');
            let line = self.line;
            return Some(Err(self.fail(ErrorImpl::IllegalCharacter { character, line })));
        };

        let text = &remaining[..len];
        let lexeme = match pattern.apply(table, text) {
            Ok(lexeme) => lexeme,
            Err(error) => return Some(Err(self.fail(error))),
        };

        let start = self.pos;
        let line = self.line;
        let token = lexeme.map(|(kind, value)| {
            MK_TOKEN!(kind, value, line, Span { start: self.position_at(start), end: self.position_at(start + len) })
        });

        if let Some(token) = &token {
            tracing::trace!(kind = %token.kind, value = %token.value, line, "token");
        }

        self.advance_n(len);

        Some(Ok(Segment {
            rule: pattern.rule(),
            start,
            end: start + len,
            token,
        }))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_segment()? {
                Ok(Segment { token: Some(token), .. }) => return Some(Ok(token)),
                Ok(_) => continue,
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Counts `\n`, `\r\n` and bare `\r` sequences, each as one line break.
pub fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }

    count
}

/// Scans `source` with an existing rule table.
#[tracing::instrument(level = "debug", skip_all, fields(file = file.as_deref().unwrap_or("shell"), len = source.len()))]
pub fn tokenize_with(table: &RuleTable, source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(table, source, file).collect()
}

/// Scans `source` with a freshly built rule table.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    tokenize_with(&RuleTable::new(), source, file)
}
