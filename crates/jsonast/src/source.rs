//! Character sources the scanner pulls from.
//!
//! The scanner never sees the whole document: it asks its source for one
//! character at a time. In-memory text is served straight from `str::Chars`;
//! byte streams go through [`ReadChars`], which decodes UTF-8 as it reads.

use std::io::{BufReader, Bytes, Read};

use crate::error::{JsonError, Result};

/// A pull-based supplier of Unicode scalar values.
pub trait CharSource {
    /// The next character, or `None` once the input is exhausted.
    fn next_char(&mut self) -> Result<Option<char>>;
}

impl CharSource for std::str::Chars<'_> {
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.next())
    }
}

/// Decodes UTF-8 from any [`Read`] implementation one character at a time.
pub struct ReadChars<R: Read> {
    bytes: Bytes<BufReader<R>>,
    decoded: usize,
}

impl<R: Read> ReadChars<R> {
    /// Decode the bytes of `reader` as UTF-8.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            decoded: 0,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.bytes.next().transpose()?)
    }

    fn invalid(&self) -> JsonError {
        JsonError::InvalidUtf8 {
            position: self.decoded,
        }
    }
}

impl<R: Read> CharSource for ReadChars<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = sequence_width(lead).ok_or_else(|| self.invalid())?;
        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(|| self.invalid())?;
        }

        // from_utf8 rejects overlong forms and encoded surrogates.
        let ch = std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| self.invalid())?;
        self.decoded += 1;
        Ok(Some(ch))
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` for bytes that
/// cannot start one.
fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
