//! Recursive-descent parser.
//!
//! ```text
//! value    := array | object | string | integer | fractional | boolean | null
//! array    := '[' (value (',' value)*)? ']'
//! object   := '{' (member (',' member)*)? '}'
//! member   := string ':' value
//! ```
//!
//! Every decision is made on the kind of the next token, peeked through a
//! [`Lookahead`] buffer. Errors are fatal: the parser stops at the first one
//! and never yields a partial tree.

use std::io::Read;
use std::str::Chars;

use crate::error::{Expected, JsonError, Result};
use crate::lookahead::{Lookahead, TokenSource};
use crate::number::{Decimal, Number};
use crate::scanner::Scanner;
use crate::source::ReadChars;
use crate::token::{Token, TokenKind};
use crate::value::{Array, Member, Object, Value};

/// Resource limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested arrays/objects. The root collection is depth 1.
    pub max_depth: usize,
    /// Largest accepted magnitude of a fractional number's exponent.
    pub max_exponent: u64,
}

impl ParseOptions {
    /// Limits generous enough for any well-formed document; the default.
    pub const fn standard() -> Self {
        Self {
            max_depth: 512,
            max_exponent: Decimal::DEFAULT_MAX_EXPONENT,
        }
    }

    /// Tighter limits for input from untrusted sources.
    pub const fn strict() -> Self {
        Self {
            max_depth: 64,
            max_exponent: 308,
        }
    }

    /// Replace the nesting limit.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the exponent limit.
    pub const fn with_max_exponent(mut self, max_exponent: u64) -> Self {
        self.max_exponent = max_exponent;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Predictive parser over any [`TokenSource`].
pub struct Parser<T> {
    tokens: Lookahead<T>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<Scanner<Chars<'a>>> {
    /// Parser over in-memory text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Self {
        Self::new(Scanner::from_text(text))
    }
}

impl<R: Read> Parser<Scanner<ReadChars<R>>> {
    /// Parser over UTF-8 text read incrementally from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self::new(Scanner::from_reader(reader))
    }
}

impl<T: TokenSource> Parser<T> {
    /// Parser over an arbitrary token source, with standard limits.
    pub fn new(source: T) -> Self {
        Self {
            tokens: Lookahead::new(source),
            options: ParseOptions::default(),
            depth: 0,
        }
    }

    /// Replace the parse limits.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a complete document: a single array or object followed by the
    /// end of input.
    pub fn parse_document(&mut self) -> Result<Value> {
        let (kind, position) = self.next_kind()?;
        let value = match kind {
            TokenKind::StartArray | TokenKind::StartObject => self.parse_value()?,
            found => return Err(JsonError::UnsupportedValue { found, position }),
        };
        self.expect(TokenKind::End)?;
        Ok(value)
    }

    /// Parse one value of any kind, leaving whatever follows it unread.
    pub fn parse_value(&mut self) -> Result<Value> {
        let (kind, position) = self.next_kind()?;
        match kind {
            TokenKind::StartArray => self.parse_array().map(Value::Array),
            TokenKind::StartObject => self.parse_object().map(Value::Object),
            TokenKind::String => Ok(Value::String(self.tokens.take(1)?.text)),
            TokenKind::Integer => {
                let token = self.tokens.take(1)?;
                integer(token).map(Value::Number)
            }
            TokenKind::Fractional => {
                let token = self.tokens.take(1)?;
                fractional(token, self.options.max_exponent).map(Value::Number)
            }
            TokenKind::True => self.literal(Value::Boolean(true)),
            TokenKind::False => self.literal(Value::Boolean(false)),
            TokenKind::Null => self.literal(Value::Null),
            found => Err(JsonError::UnsupportedValue { found, position }),
        }
    }

    fn parse_array(&mut self) -> Result<Array> {
        let open = self.expect(TokenKind::StartArray)?;
        self.enter(&open)?;

        let mut items = Vec::new();
        if self.tokens.peek(1)?.kind != TokenKind::EndArray {
            loop {
                items.push(self.parse_value()?);
                if self.tokens.peek(1)?.kind == TokenKind::EndArray {
                    break;
                }
                self.expect(TokenKind::Comma)?;
                let next = self.tokens.peek(1)?;
                if next.kind == TokenKind::EndArray {
                    return Err(JsonError::UnexpectedToken {
                        expected: Expected::Value,
                        found: next.kind,
                        position: next.position,
                    });
                }
            }
        }

        self.expect(TokenKind::EndArray)?;
        self.depth -= 1;
        Ok(Array::new(items))
    }

    fn parse_object(&mut self) -> Result<Object> {
        let open = self.expect(TokenKind::StartObject)?;
        self.enter(&open)?;

        let mut members = Vec::new();
        if self.tokens.peek(1)?.kind != TokenKind::EndObject {
            loop {
                members.push(self.parse_member()?);
                if self.tokens.peek(1)?.kind == TokenKind::EndObject {
                    break;
                }
                self.expect(TokenKind::Comma)?;
            }
        }

        self.expect(TokenKind::EndObject)?;
        self.depth -= 1;
        Ok(Object::new(members))
    }

    /// `string ':' value`. A closer right after a comma fails here on the name.
    fn parse_member(&mut self) -> Result<Member> {
        let name = self.expect(TokenKind::String)?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_value()?;
        Ok(Member::new(name.text, value))
    }

    fn next_kind(&mut self) -> Result<(TokenKind, usize)> {
        let next = self.tokens.peek(1)?;
        Ok((next.kind, next.position))
    }

    fn literal(&mut self, value: Value) -> Result<Value> {
        self.tokens.skip(1)?;
        Ok(value)
    }

    /// Consume the next token, which must be of `kind`.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let next = self.tokens.peek(1)?;
        if next.kind != kind {
            return Err(JsonError::UnexpectedToken {
                expected: Expected::Token(kind),
                found: next.kind,
                position: next.position,
            });
        }
        self.tokens.take(1)
    }

    fn enter(&mut self, open: &Token) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(JsonError::NestingTooDeep {
                limit: self.options.max_depth,
                position: open.position,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

fn integer(token: Token) -> Result<Number> {
    match token.text.parse::<i64>() {
        Ok(n) => Ok(Number::Integer(n)),
        Err(_) => Err(JsonError::InvalidNumberFormat {
            text: token.text,
            position: token.position,
        }),
    }
}

fn fractional(token: Token, max_exponent: u64) -> Result<Number> {
    match Decimal::parse_bounded(&token.text, max_exponent) {
        Ok(d) => Ok(Number::Decimal(d)),
        Err(_) => Err(JsonError::InvalidNumberFormat {
            text: token.text,
            position: token.position,
        }),
    }
}
