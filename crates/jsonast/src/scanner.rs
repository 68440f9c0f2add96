//! Character-level scanner.
//!
//! Turns a [`CharSource`] into [`Token`]s. The scanner holds exactly one
//! pending character, which is enough to recognize every multi-character token
//! without re-reading: a number ends when the pending character cannot extend
//! it, a literal is compared one pending character at a time.
//!
//! Positions are character offsets: `position` counts every consumed character
//! and is reported verbatim in errors.

use std::io::Read;
use std::str::Chars;

use crate::error::{JsonError, Result};
use crate::lookahead::TokenSource;
use crate::source::{CharSource, ReadChars};
use crate::token::{Token, TokenKind};

/// Tokenizer over a character source with one character of pushback.
pub struct Scanner<S> {
    source: S,
    pending: Option<char>,
    exhausted: bool,
    position: usize,
}

impl<'a> Scanner<Chars<'a>> {
    /// Scan in-memory text.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.chars())
    }
}

impl<R: Read> Scanner<ReadChars<R>> {
    /// Scan UTF-8 text pulled incrementally from a reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadChars::new(reader))
    }
}

impl<S: CharSource> Scanner<S> {
    /// Scan characters pulled from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
            exhausted: false,
            position: 0,
        }
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Produce the next token, or a [`TokenKind::End`] token once input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace()?;
        let start = self.position;

        let Some(ch) = self.peek()? else {
            return Ok(Token::end(start));
        };

        let kind = match ch {
            '[' => TokenKind::StartArray,
            ']' => TokenKind::EndArray,
            '{' => TokenKind::StartObject,
            '}' => TokenKind::EndObject,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '"' => return self.scan_string(),
            '+' | '-' | '0'..='9' => return self.scan_number(),
            't' => return self.scan_literal(ch, "true", TokenKind::True),
            'f' => return self.scan_literal(ch, "false", TokenKind::False),
            'n' => return self.scan_literal(ch, "null", TokenKind::Null),
            other => {
                return Err(JsonError::UnexpectedCharacter {
                    character: other,
                    position: start,
                })
            }
        };

        self.bump();
        Ok(Token::new(kind, start))
    }

    // ------------------------------------------------------------------
    // Strings

    fn scan_string(&mut self) -> Result<Token> {
        let start = self.position;
        self.bump();

        let mut text = String::new();
        loop {
            match self.consume()? {
                None => {
                    return Err(JsonError::UnexpectedEnd {
                        position: self.position,
                    })
                }
                Some('"') => return Ok(Token::with_text(TokenKind::String, text, start)),
                Some('\\') => text.push(self.scan_escape()?),
                Some(ch) => text.push(ch),
            }
        }
    }

    /// Decode the escape following a consumed backslash.
    fn scan_escape(&mut self) -> Result<char> {
        let position = self.position;
        let ch = self
            .consume()?
            .ok_or(JsonError::UnexpectedEnd { position })?;

        let decoded = match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.scan_unicode_escape(position - 1),
            other => {
                return Err(JsonError::InvalidEscape {
                    character: other,
                    position,
                })
            }
        };
        Ok(decoded)
    }

    /// Decode `XXXX` after `\u`, pulling in the low half of a surrogate pair
    /// when the first escape is a high surrogate.
    fn scan_unicode_escape(&mut self, escape_start: usize) -> Result<char> {
        let code = self.scan_hex4()?;

        match code {
            0xD800..=0xDBFF => {
                self.expect_pair_marker('\\', code, escape_start)?;
                self.expect_pair_marker('u', code, escape_start)?;
                let low = self.scan_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(JsonError::UnpairedSurrogate {
                        code,
                        position: escape_start,
                    });
                }
                let scalar = 0x10000 + ((u32::from(code) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                char::from_u32(scalar).ok_or(JsonError::UnpairedSurrogate {
                    code,
                    position: escape_start,
                })
            }
            0xDC00..=0xDFFF => Err(JsonError::UnpairedSurrogate {
                code,
                position: escape_start,
            }),
            _ => char::from_u32(u32::from(code)).ok_or(JsonError::UnpairedSurrogate {
                code,
                position: escape_start,
            }),
        }
    }

    fn expect_pair_marker(&mut self, marker: char, code: u16, escape_start: usize) -> Result<()> {
        match self.peek()? {
            Some(ch) if ch == marker => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(JsonError::UnpairedSurrogate {
                code,
                position: escape_start,
            }),
            None => Err(JsonError::UnexpectedEnd {
                position: self.position,
            }),
        }
    }

    fn scan_hex4(&mut self) -> Result<u16> {
        let mut code: u16 = 0;
        for _ in 0..4 {
            let position = self.position;
            let ch = self
                .consume()?
                .ok_or(JsonError::UnexpectedEnd { position })?;
            let digit = ch
                .to_digit(16)
                .ok_or(JsonError::UnexpectedCharacter {
                    character: ch,
                    position,
                })?;
            code = (code << 4) | digit as u16;
        }
        Ok(code)
    }

    // ------------------------------------------------------------------
    // Numbers

    fn scan_number(&mut self) -> Result<Token> {
        let start = self.position;
        let mut text = String::new();
        let mut kind = TokenKind::Integer;

        if let Some(sign @ ('+' | '-')) = self.peek()? {
            self.bump();
            text.push(sign);
        }
        self.scan_digits(&mut text)?;

        if self.peek()? == Some('.') {
            self.bump();
            text.push('.');
            self.scan_required_digits(&mut text)?;
            kind = TokenKind::Fractional;
        }

        if let Some(marker @ ('e' | 'E')) = self.peek()? {
            self.bump();
            text.push(marker);
            if let Some(sign @ ('+' | '-')) = self.peek()? {
                self.bump();
                text.push(sign);
            }
            self.scan_required_digits(&mut text)?;
            kind = TokenKind::Fractional;
        }

        match self.peek()? {
            Some(ch) if !ends_number(ch) => Err(JsonError::UnexpectedCharacter {
                character: ch,
                position: self.position,
            }),
            _ => Ok(Token::with_text(kind, text, start)),
        }
    }

    fn scan_digits(&mut self, text: &mut String) -> Result<()> {
        while let Some(digit) = self.peek()? {
            if !digit.is_ascii_digit() {
                break;
            }
            self.bump();
            text.push(digit);
        }
        Ok(())
    }

    /// At least one digit must follow a `.` or an exponent marker.
    fn scan_required_digits(&mut self, text: &mut String) -> Result<()> {
        match self.peek()? {
            None => Err(JsonError::UnexpectedEnd {
                position: self.position,
            }),
            Some(ch) if !ch.is_ascii_digit() => Err(JsonError::UnexpectedCharacter {
                character: ch,
                position: self.position,
            }),
            Some(_) => self.scan_digits(text),
        }
    }

    // ------------------------------------------------------------------
    // Literals

    fn scan_literal(&mut self, lead: char, word: &str, kind: TokenKind) -> Result<Token> {
        let start = self.position;
        for expected in word.chars() {
            if self.peek()? != Some(expected) {
                return Err(JsonError::UnexpectedCharacter {
                    character: lead,
                    position: start,
                });
            }
            self.bump();
        }
        Ok(Token::new(kind, start))
    }

    // ------------------------------------------------------------------
    // Character control

    fn peek(&mut self) -> Result<Option<char>> {
        if self.pending.is_none() && !self.exhausted {
            self.pending = self.source.next_char()?;
            self.exhausted = self.pending.is_none();
        }
        Ok(self.pending)
    }

    fn bump(&mut self) {
        if self.pending.take().is_some() {
            self.position += 1;
        }
    }

    fn consume(&mut self) -> Result<Option<char>> {
        let ch = self.peek()?;
        self.bump();
        Ok(ch)
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(ch) = self.peek()? {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
        Ok(())
    }
}

impl<S: CharSource> TokenSource for Scanner<S> {
    fn next_token(&mut self) -> Result<Token> {
        Scanner::next_token(self)
    }
}

fn ends_number(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | ']' | '}')
}
