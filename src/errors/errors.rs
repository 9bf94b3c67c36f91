use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::SourceNotFound { .. } => "SourceNotFound",
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::Io { .. } => "IoError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::SourceNotFound { path } => {
                ErrorTip::Suggestion(format!("File path does not exist: `{}`", path))
            }
            ErrorImpl::IllegalCharacter { character, line } => ErrorTip::Suggestion(format!(
                "Illegal character `{}` on line {}",
                character.escape_default(),
                line
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.internal_error, self.position.1)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("source not found: {path:?}")]
    SourceNotFound { path: String },
    #[error("illegal character {character:?} on line {line}")]
    IllegalCharacter { character: char, line: usize },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("i/o error: {message}")]
    Io { message: String },
}
