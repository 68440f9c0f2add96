//! Lexical tokens produced by the [`Scanner`](crate::scanner::Scanner).

use std::fmt;

/// The classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A quoted string; the token text holds the decoded contents.
    String,
    /// A number without fraction or exponent; the token text holds the raw digits.
    Integer,
    /// A number with a fraction and/or exponent; the token text holds the raw form.
    Fractional,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// No more tokens.
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::StartArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::StartObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "a string",
            TokenKind::Integer => "an integer",
            TokenKind::Fractional => "a fractional number",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::End => "the end of input",
        };
        f.write_str(s)
    }
}

/// A classified lexical unit.
///
/// `text` carries the payload of string and number tokens and is empty for
/// punctuation and literals. `position` is the character offset where the
/// token started (for `End`, the offset where input ran out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    /// A token without payload text.
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self {
            kind,
            text: String::new(),
            position,
        }
    }

    /// A token carrying payload text.
    pub fn with_text(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The terminator produced once the input is exhausted.
    pub fn end(position: usize) -> Self {
        Self::new(TokenKind::End, position)
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
