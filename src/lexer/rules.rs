use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use regex::Regex;

use crate::{errors::errors::ErrorImpl, MK_DEFAULT_HANDLER};

use super::tokens::{ReservedTable, TokenKind, TokenValue};

/// Output of a rule handler: `None` for matches that produce no token.
pub type Lexeme = Option<(TokenKind, TokenValue)>;

pub type RuleHandler = fn(&RuleTable, RuleKind, &str) -> Result<Lexeme, ErrorImpl>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerFormat {
    Binary,
    Octal,
    Hexadecimal,
    Decimal,
}

impl IntegerFormat {
    pub fn radix(&self) -> u32 {
        match self {
            IntegerFormat::Binary => 2,
            IntegerFormat::Octal => 8,
            IntegerFormat::Hexadecimal => 16,
            IntegerFormat::Decimal => 10,
        }
    }

    /// Length of the `0b` / `0x` marker in front of the digits.
    fn prefix_len(&self) -> usize {
        match self {
            IntegerFormat::Binary | IntegerFormat::Hexadecimal => 2,
            IntegerFormat::Octal | IntegerFormat::Decimal => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealFormat {
    /// `1.5e2`, kept as an exact decimal.
    Exponent,
    /// `1.5`, decoded to a float.
    Plain,
}

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    StringExplicit,
    Identifier,
    Char,
    Comment,
    Real(RealFormat),
    Integer(IntegerFormat),
    Bool,
    Comparator,
    Arithmetic,
    Literal,
    Whitespace,
    Newline,
}

impl RuleKind {
    pub fn is_discarded(&self) -> bool {
        matches!(self, RuleKind::Comment | RuleKind::Whitespace | RuleKind::Newline)
    }
}

#[derive(Clone)]
pub struct RegexPattern {
    rule: RuleKind,
    regex: Regex,
    handler: RuleHandler,
}

impl RegexPattern {
    fn new(rule: RuleKind, pattern: &str, handler: RuleHandler) -> RegexPattern {
        // Every pattern is anchored; the lexer only ever matches at the cursor.
        let anchored = format!("\\A(?:{})", pattern);
        RegexPattern {
            rule,
            regex: Regex::new(&anchored).expect("built-in lexer pattern must compile"),
            handler,
        }
    }

    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }

    pub fn apply(&self, table: &RuleTable, text: &str) -> Result<Lexeme, ErrorImpl> {
        (self.handler)(table, self.rule, text)
    }
}

/// Ordered token rules plus the reserved-word table.
///
/// Rules are tried top to bottom and the first one matching at the cursor
/// wins. Several rules deliberately shadow later ones:
///
/// - identifiers come before everything else that could start with a letter,
///   so reserved words are found by value
/// - comments come before arithmetic, so `//` and `/*` are never divisions
/// - reals come before integers, so `1.5` is not split into `1`, `.`, `5`
/// - inside each operator rule, two-character forms come first
///
/// The table is immutable once built and can be shared between sessions.
#[derive(Clone)]
pub struct RuleTable {
    patterns: Vec<RegexPattern>,
    reserved: ReservedTable,
}

const INT_PART: &str = "(?:[1-9][0-9]*|0)";

impl RuleTable {
    pub fn new() -> RuleTable {
        let mantissa = format!("(?:{INT_PART}\\.[0-9]*|\\.[0-9]+)");

        RuleTable {
            patterns: vec![
                RegexPattern::new(RuleKind::StringExplicit, "\"[^\"\\n\\r]*\"", string_handler),
                RegexPattern::new(RuleKind::Identifier, "[a-zA-Z_]\\w*", symbol_handler),
                RegexPattern::new(RuleKind::Char, "'[\\x00-\\x7F]'", char_handler),
                RegexPattern::new(RuleKind::Comment, "//[^\\r\\n]*|/\\*(?s:.)*?\\*/", skip_handler),
                RegexPattern::new(RuleKind::Real(RealFormat::Exponent), &format!("{mantissa}[eE]{INT_PART}"), real_handler),
                RegexPattern::new(RuleKind::Real(RealFormat::Plain), &mantissa, real_handler),
                RegexPattern::new(RuleKind::Integer(IntegerFormat::Binary), "0[bB][01]+", integer_handler),
                RegexPattern::new(RuleKind::Integer(IntegerFormat::Octal), "0[0-7]+", integer_handler),
                RegexPattern::new(RuleKind::Integer(IntegerFormat::Hexadecimal), "0[xX][0-9a-fA-F]+", integer_handler),
                RegexPattern::new(RuleKind::Integer(IntegerFormat::Decimal), INT_PART, integer_handler),
                RegexPattern::new(RuleKind::Bool, "&&|\\|\\||!", MK_DEFAULT_HANDLER!(TokenKind::Bool)),
                RegexPattern::new(RuleKind::Comparator, "==|>=|>|<=|<", MK_DEFAULT_HANDLER!(TokenKind::Comparator)),
                RegexPattern::new(RuleKind::Arithmetic, "[+\\-*/]", MK_DEFAULT_HANDLER!(TokenKind::Arithmetic)),
                RegexPattern::new(RuleKind::Literal, "[{}()\\[\\]=:,;]", literal_handler),
                RegexPattern::new(RuleKind::Whitespace, "[ \\t]+", skip_handler),
                RegexPattern::new(RuleKind::Newline, "\\r\\n|\\r|\\n", skip_handler),
            ],
            reserved: ReservedTable::new(),
        }
    }

    pub fn patterns(&self) -> &[RegexPattern] {
        &self.patterns
    }

    pub fn reserved(&self) -> &ReservedTable {
        &self.reserved
    }

    /// First rule matching at the start of `input`, with the match length.
    pub fn first_match(&self, input: &str) -> Option<(&RegexPattern, usize)> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.match_len(input).map(|len| (pattern, len)))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_handler(_table: &RuleTable, _rule: RuleKind, _text: &str) -> Result<Lexeme, ErrorImpl> {
    Ok(None)
}

fn string_handler(_table: &RuleTable, _rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    let contents = &text[1..text.len() - 1];
    Ok(Some((TokenKind::StringExplicit, TokenValue::Text(String::from(contents)))))
}

fn symbol_handler(table: &RuleTable, _rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    Ok(Some(table.reserved.resolve(text)))
}

fn char_handler(_table: &RuleTable, _rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    // The pattern only admits a single ASCII byte between the quotes.
    let ch = text.as_bytes()[1] as char;
    Ok(Some((TokenKind::Char, TokenValue::Char(ch))))
}

fn literal_handler(_table: &RuleTable, _rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    let kind = match text {
        "{" => TokenKind::OpenCurly,
        "}" => TokenKind::CloseCurly,
        "(" => TokenKind::OpenParen,
        ")" => TokenKind::CloseParen,
        "[" => TokenKind::OpenBracket,
        "]" => TokenKind::CloseBracket,
        "=" => TokenKind::Assignment,
        ":" => TokenKind::Colon,
        "," => TokenKind::Comma,
        _ => TokenKind::Semicolon,
    };

    Ok(Some((kind, TokenValue::Text(String::from(text)))))
}

fn real_handler(_table: &RuleTable, rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    let value = match rule {
        RuleKind::Real(RealFormat::Exponent) => TokenValue::Decimal(decode_exact_real(text)?),
        _ => TokenValue::Float(decode_float(text)?),
    };

    Ok(Some((TokenKind::Real, value)))
}

fn integer_handler(_table: &RuleTable, rule: RuleKind, text: &str) -> Result<Lexeme, ErrorImpl> {
    let format = match rule {
        RuleKind::Integer(format) => format,
        _ => IntegerFormat::Decimal,
    };

    Ok(Some((TokenKind::Integer, TokenValue::Integer(decode_integer(format, text)?))))
}

fn number_error(text: &str) -> ErrorImpl {
    ErrorImpl::NumberParseError { token: String::from(text) }
}

/// Decodes an integer literal of the given base, without any width limit.
pub fn decode_integer(format: IntegerFormat, text: &str) -> Result<BigUint, ErrorImpl> {
    let digits = text.get(format.prefix_len()..).ok_or_else(|| number_error(text))?;
    BigUint::parse_bytes(digits.as_bytes(), format.radix()).ok_or_else(|| number_error(text))
}

/// Decodes `<mantissa>[eE]<exponent>` into an exact decimal.
///
/// The digits of the mantissa become the unscaled value; the scale is the
/// number of fractional digits minus the exponent.
/// An exponent whose scale does not fit in `i64` is a `NumberParseError`.
pub fn decode_exact_real(text: &str) -> Result<BigDecimal, ErrorImpl> {
    let (mantissa, exponent) = text
        .split_once(|c| c == 'e' || c == 'E')
        .ok_or_else(|| number_error(text))?;
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = format!("{int_part}{frac_part}");
    if digits.is_empty() {
        digits.push('0');
    }

    let unscaled = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| number_error(text))?;
    let exponent: i64 = exponent.parse().map_err(|_| number_error(text))?;
    let scale = (frac_part.len() as i64)
        .checked_sub(exponent)
        .ok_or_else(|| number_error(text))?;

    Ok(BigDecimal::new(unscaled, scale))
}

/// Decodes `1.5`, `1.` or `.5` into a float.
pub fn decode_float(text: &str) -> Result<f64, ErrorImpl> {
    let mut normalized = String::with_capacity(text.len() + 2);
    if text.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(text);
    if text.ends_with('.') {
        normalized.push('0');
    }

    normalized.parse::<f64>().map_err(|_| number_error(text))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_decode_integer_bases() {
        assert_eq!(decode_integer(IntegerFormat::Binary, "0b101").unwrap(), BigUint::from(5u32));
        assert_eq!(decode_integer(IntegerFormat::Binary, "0B11").unwrap(), BigUint::from(3u32));
        assert_eq!(decode_integer(IntegerFormat::Octal, "017").unwrap(), BigUint::from(15u32));
        assert_eq!(decode_integer(IntegerFormat::Hexadecimal, "0x1F").unwrap(), BigUint::from(31u32));
        assert_eq!(decode_integer(IntegerFormat::Decimal, "0").unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn test_decode_integer_is_unbounded() {
        let value = decode_integer(IntegerFormat::Decimal, "340282366920938463463374607431768211456").unwrap();
        assert_eq!(value, BigUint::from(u128::MAX) + 1u32);
    }

    #[test]
    fn test_decode_exact_real() {
        assert_eq!(decode_exact_real("1.5e2").unwrap(), BigDecimal::from(150));
        assert_eq!(decode_exact_real(".25E1").unwrap(), BigDecimal::from_str("2.5").unwrap());
        assert_eq!(decode_exact_real("3.e0").unwrap(), BigDecimal::from(3));
        assert_eq!(
            decode_exact_real("0.1000000000000000000000000001e0").unwrap(),
            BigDecimal::from_str("0.1000000000000000000000000001").unwrap()
        );
    }

    #[test]
    fn test_decode_float_forms() {
        assert_eq!(decode_float("1.5").unwrap(), 1.5);
        assert_eq!(decode_float("2.").unwrap(), 2.0);
        assert_eq!(decode_float(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_rule_order() {
        let table = RuleTable::new();
        let rules: Vec<RuleKind> = table.patterns().iter().map(|p| p.rule()).collect();

        let position = |rule: RuleKind| rules.iter().position(|r| *r == rule).unwrap();
        assert!(position(RuleKind::Identifier) < position(RuleKind::Bool));
        assert!(position(RuleKind::Comment) < position(RuleKind::Arithmetic));
        assert!(position(RuleKind::Real(RealFormat::Plain)) < position(RuleKind::Integer(IntegerFormat::Decimal)));
        assert!(position(RuleKind::Integer(IntegerFormat::Octal)) < position(RuleKind::Integer(IntegerFormat::Decimal)));
        assert_eq!(rules.last(), Some(&RuleKind::Newline));
    }

    #[test]
    fn test_first_match_prefers_earlier_rule() {
        let table = RuleTable::new();

        let (pattern, len) = table.first_match("//x").unwrap();
        assert_eq!(pattern.rule(), RuleKind::Comment);
        assert_eq!(len, 3);

        let (pattern, len) = table.first_match("0 ").unwrap();
        assert_eq!(pattern.rule(), RuleKind::Integer(IntegerFormat::Decimal));
        assert_eq!(len, 1);

        assert!(table.first_match("@").is_none());
    }

    #[test]
    fn test_reserved_table_size() {
        assert_eq!(RuleTable::new().reserved().len(), 14);
    }
}
