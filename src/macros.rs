//! Utility macros for the lexer.
//!
//! This module defines helper macros used by the rule table:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default rule handler for fixed tokens
//!
//! These macros reduce boilerplate in the rule definitions.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The decoded TokenValue
/// * `$line` - The line the token starts on
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, TokenValue::Integer(42u32.into()), 1, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            span: $span,
        }
    };
}

/// Creates a default rule handler for tokens whose value is the matched text.
///
/// Used for the operator rules.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
///
/// # Example
///
/// ```ignore
/// RegexPattern::new(RuleKind::Arithmetic, "[+\\-*/]", MK_DEFAULT_HANDLER!(TokenKind::Arithmetic))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |_table: &RuleTable, _rule: RuleKind, text: &str| {
            Ok(Some(($kind, TokenValue::Text(String::from(text)))))
        }
    };
}
