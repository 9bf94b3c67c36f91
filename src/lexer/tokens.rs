use std::{collections::HashMap, fmt::Display};

use bigdecimal::BigDecimal;
use num_bigint::BigUint;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    StringExplicit,
    Identifier, // STRING_IMPLICIT
    Char,
    Real,
    Integer,
    Arithmetic,
    Bool,
    Comparator,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Assignment, // =
    Colon,
    Comma,
    Semicolon,

    // Reserved
    Tr,
    Fl,
    Let,
    Int,
    Float,
    Character,
    While,
    Boolean,
    Function,
    Return,
    Type,
    If,
    Else,
    Null,
}

impl TokenKind {
    /// Name used in listings and by downstream stages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::StringExplicit => "STRING_EXPLICIT",
            TokenKind::Identifier => "STRING_IMPLICIT",
            TokenKind::Char => "CHAR",
            TokenKind::Real => "REAL",
            TokenKind::Integer => "INTEGER",
            TokenKind::Arithmetic => "ARITHMETIC",
            TokenKind::Bool => "BOOL",
            TokenKind::Comparator => "COMPARATOR",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Assignment => "=",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Tr => "TR",
            TokenKind::Fl => "FL",
            TokenKind::Let => "LET",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Character => "CHARACTER",
            TokenKind::While => "WHILE",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Type => "TYPE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Null => "NULL",
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            TokenKind::Tr
                | TokenKind::Fl
                | TokenKind::Let
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Character
                | TokenKind::While
                | TokenKind::Boolean
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Type
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Null
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded payload of a token.
///
/// Reals written with an exponent keep every digit as a [`BigDecimal`];
/// reals without one are plain `f64`. Integers of any base are unbounded.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(BigUint),
    Decimal(BigDecimal),
    Float(f64),
    Text(String),
    Char(char),
    Bool(bool),
    Null,
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Decimal(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{:?}", value),
            TokenValue::Text(value) => write!(f, "{}", value),
            TokenValue::Char(value) => write!(f, "{}", value),
            TokenValue::Bool(value) => write!(f, "{}", value),
            TokenValue::Null => write!(f, "null"),
        }
    }
}

/// Reserved spellings, keyed by their uppercase form.
///
/// Built once per [`RuleTable`](super::rules::RuleTable) and only read afterwards.
#[derive(Debug, Clone)]
pub struct ReservedTable {
    entries: HashMap<&'static str, (TokenKind, TokenValue)>,
}

impl ReservedTable {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        map.insert("TR", (TokenKind::Tr, TokenValue::Bool(true)));
        map.insert("FL", (TokenKind::Fl, TokenValue::Bool(false)));
        map.insert("LET", (TokenKind::Let, TokenValue::Text(String::from("let"))));
        map.insert("INT", (TokenKind::Int, TokenValue::Text(String::from("int"))));
        map.insert("FLOAT", (TokenKind::Float, TokenValue::Text(String::from("float"))));
        map.insert("CHARACTER", (TokenKind::Character, TokenValue::Text(String::from("character"))));
        map.insert("WHILE", (TokenKind::While, TokenValue::Text(String::from("while"))));
        map.insert("BOOLEAN", (TokenKind::Boolean, TokenValue::Text(String::from("boolean"))));
        map.insert("FUNCTION", (TokenKind::Function, TokenValue::Text(String::from("function"))));
        map.insert("RETURN", (TokenKind::Return, TokenValue::Text(String::from("return"))));
        map.insert("TYPE", (TokenKind::Type, TokenValue::Text(String::from("type"))));
        map.insert("IF", (TokenKind::If, TokenValue::Text(String::from("if"))));
        map.insert("ELSE", (TokenKind::Else, TokenValue::Text(String::from("else"))));
        map.insert("NULL", (TokenKind::Null, TokenValue::Null));

        ReservedTable { entries: map }
    }

    /// Classifies an identifier-shaped spelling.
    ///
    /// Only all-lowercase text is eligible for a reserved kind; anything with
    /// an uppercase letter (or no letter at all) stays an identifier.
    pub fn resolve(&self, text: &str) -> (TokenKind, TokenValue) {
        let has_lower = text.chars().any(char::is_lowercase);
        let has_upper = text.chars().any(char::is_uppercase);

        if has_lower && !has_upper {
            if let Some((kind, value)) = self.entries.get(text.to_uppercase().as_str()) {
                return (*kind, value.clone());
            }
        }

        (TokenKind::Identifier, TokenValue::Text(String::from(text)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReservedTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: usize,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}
