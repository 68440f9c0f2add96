//! JSON serializer.
//!
//! Walks a [`Value`] depth first and writes it into any [`fmt::Write`] sink as
//! it goes; nothing is buffered beyond what the sink itself keeps.
//!
//! - **Compact**: no whitespace at all, `:` and `,` as the only separators
//! - **Pretty**: one child per line, two spaces of indentation per level,
//!   `": "` between a member name and its value, `[]` / `{}` for empty
//!   collections
//!
//! Strings are always emitted as pure ASCII: every character above U+007F is
//! written as a `\uXXXX` escape (a surrogate pair outside the BMP).

use std::fmt::{self, Write};
use std::io;

use crate::value::{Array, Member, Object, Value};

const INDENT: &str = "  ";

impl Value {
    /// Serialize to a new `String`.
    pub fn stringify(&self, pretty: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_fmt_to(&mut out, pretty);
        out
    }

    /// Serialize into a [`fmt::Write`] sink.
    pub fn write_fmt_to<W: Write + ?Sized>(&self, out: &mut W, pretty: bool) -> fmt::Result {
        Stringifier { out, pretty }.value(self, 0)
    }

    /// Serialize into an [`io::Write`] sink, surfacing the first I/O error.
    pub fn write_to<W: io::Write>(&self, writer: W, pretty: bool) -> io::Result<()> {
        let mut adapter = IoAdapter {
            inner: writer,
            error: None,
        };
        match self.write_fmt_to(&mut adapter, pretty) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(adapter
                .error
                .unwrap_or_else(|| io::Error::other("formatter error"))),
        }
    }
}

/// `{}` renders compact, `{:#}` renders pretty.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        self.write_fmt_to(f, pretty)
    }
}

struct Stringifier<'a, W: ?Sized> {
    out: &'a mut W,
    pretty: bool,
}

impl<W: Write + ?Sized> Stringifier<'_, W> {
    fn value(&mut self, value: &Value, depth: usize) -> fmt::Result {
        match value {
            Value::String(s) => write_escaped(self.out, s),
            Value::Number(n) => write!(self.out, "{n}"),
            Value::Boolean(true) => self.out.write_str("true"),
            Value::Boolean(false) => self.out.write_str("false"),
            Value::Null => self.out.write_str("null"),
            Value::Array(array) => self.array(array, depth),
            Value::Object(object) => self.object(object, depth),
        }
    }

    fn array(&mut self, array: &Array, depth: usize) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, item) in array.iter().enumerate() {
            self.separator(i, depth + 1)?;
            self.value(item, depth + 1)?;
        }
        self.close(array.is_empty(), depth)?;
        self.out.write_char(']')
    }

    fn object(&mut self, object: &Object, depth: usize) -> fmt::Result {
        self.out.write_char('{')?;
        for (i, member) in object.iter().enumerate() {
            self.separator(i, depth + 1)?;
            self.member(member, depth + 1)?;
        }
        self.close(object.is_empty(), depth)?;
        self.out.write_char('}')
    }

    fn member(&mut self, member: &Member, depth: usize) -> fmt::Result {
        write_escaped(self.out, member.name())?;
        self.out.write_str(if self.pretty { ": " } else { ":" })?;
        self.value(member.value(), depth)
    }

    /// Emitted before the `index`-th child of a collection.
    fn separator(&mut self, index: usize, depth: usize) -> fmt::Result {
        if index > 0 {
            self.out.write_char(',')?;
        }
        if self.pretty {
            self.newline(depth)?;
        }
        Ok(())
    }

    fn close(&mut self, empty: bool, depth: usize) -> fmt::Result {
        if self.pretty && !empty {
            self.newline(depth)?;
        }
        Ok(())
    }

    fn newline(&mut self, depth: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..depth {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }
}

/// Write `s` as a quoted, escaped JSON string.
pub fn write_escaped<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if u32::from(c) > 0x7F => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{unit:04x}")?;
                }
            }
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Bridges `fmt::Write` onto an `io::Write`, keeping the error that
/// `fmt::Error` cannot carry.
struct IoAdapter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
