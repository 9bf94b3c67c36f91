//! Lexical analysis for AJS source text.
//!
//! This module contains the lexer that converts source code into a stream of
//! tokens for later stages. It handles:
//!
//! - An ordered rule table where the first matching rule wins
//! - Reserved words resolved by value from identifier matches
//! - Integer literals in four bases and reals in exact or float form
//! - Line tracking across `\n`, `\r\n` and `\r`, skipping comments and whitespace

pub mod lexer;
pub mod rules;
pub mod tokens;
