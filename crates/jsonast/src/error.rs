//! Error types for scanning and parsing JSON text.
//!
//! Every variant is fatal: the scanner and parser stop at the first problem and
//! hand it back to the caller with the character offset where it was detected.

use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

/// What the parser was looking for when it hit an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token kind (a delimiter, a colon, a comma, the end of input...).
    Token(TokenKind),
    /// The start of any value.
    Value,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Value => f.write_str("a value"),
        }
    }
}

/// Errors that can occur while turning JSON text into a [`Value`](crate::Value).
#[derive(Error, Debug)]
pub enum JsonError {
    /// A character that cannot start or continue any token.
    #[error("unexpected character {character:?} at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// Input ran out in the middle of a string or number.
    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    /// An escape sequence other than `\" \\ \/ \b \f \n \r \t \uXXXX`.
    #[error("invalid escape character {character:?} at position {position}")]
    InvalidEscape { character: char, position: usize },

    /// A `\uXXXX` surrogate half without its partner.
    #[error("unpaired surrogate \\u{code:04x} at position {position}")]
    UnpairedSurrogate { code: u16, position: usize },

    /// The parser required one token and found another.
    #[error("unexpected token at position {position}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        position: usize,
    },

    /// No grammar production starts with the token at a value position.
    #[error("unsupported value at position {position}: no value can start with {found}")]
    UnsupportedValue { found: TokenKind, position: usize },

    /// Number text that does not convert to an `i64` or a decimal.
    #[error("invalid number format {text:?} at position {position}")]
    InvalidNumberFormat { text: String, position: usize },

    /// Arrays or objects nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },

    /// Stream input that is not valid UTF-8.
    #[error("invalid UTF-8 sequence at character position {position}")]
    InvalidUtf8 { position: usize },

    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    /// Character offset where the error was detected, when one is known.
    pub fn position(&self) -> Option<usize> {
        match self {
            JsonError::UnexpectedCharacter { position, .. }
            | JsonError::UnexpectedEnd { position }
            | JsonError::InvalidEscape { position, .. }
            | JsonError::UnpairedSurrogate { position, .. }
            | JsonError::UnexpectedToken { position, .. }
            | JsonError::UnsupportedValue { position, .. }
            | JsonError::InvalidNumberFormat { position, .. }
            | JsonError::NestingTooDeep { position, .. }
            | JsonError::InvalidUtf8 { position } => Some(*position),
            JsonError::Io(_) => None,
        }
    }
}

/// Convenience alias used throughout jsonast.
pub type Result<T> = std::result::Result<T, JsonError>;
