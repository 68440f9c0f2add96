//! # jsonast
//!
//! A JSON reader and writer built around an explicit, immutable syntax tree.
//!
//! Text is scanned one character at a time into tokens, the tokens are parsed
//! by recursive descent with arbitrary lookahead, and the resulting [`Value`]
//! tree can be written back out compactly or pretty-printed. Numbers keep their
//! exact written value: integers as `i64`, everything else as an
//! arbitrary-precision [`Decimal`].
//!
//! ## Quick start
//!
//! ```rust
//! use jsonast::{parse, Value};
//!
//! let doc = parse(r#"{"name": "Alice", "scores": [95, 87.5]}"#).unwrap();
//! let object = doc.as_object().unwrap();
//! assert_eq!(object.get("name").and_then(Value::as_str), Some("Alice"));
//!
//! assert_eq!(doc.stringify(false), r#"{"name":"Alice","scores":[95,87.5]}"#);
//! assert_eq!(
//!     doc.stringify(true),
//!     "{\n  \"name\": \"Alice\",\n  \"scores\": [\n    95,\n    87.5\n  ]\n}"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: characters → tokens, with escape and number recognition
//! - [`source`]: character sources for in-memory text and UTF-8 byte streams
//! - [`lookahead`]: FIFO token buffer with peek-by-distance
//! - [`parser`]: recursive-descent parser and [`ParseOptions`] limits
//! - [`value`]: the `Value` / `Array` / `Object` / `Member` tree
//! - [`number`]: `Number` and the arbitrary-precision `Decimal`
//! - [`stringify`]: compact and pretty serialization
//! - [`token`]: token kinds and tokens
//! - [`error`]: error types for scanning and parsing failures

pub mod error;
pub mod lookahead;
pub mod number;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod stringify;
pub mod token;
pub mod value;

use std::io::Read;

pub use error::{Expected, JsonError, Result};
pub use number::{Decimal, DecimalError, Number};
pub use parser::{ParseOptions, Parser};
pub use token::{Token, TokenKind};
pub use value::{Array, Member, Object, Value};

/// Parse a JSON document whose root is an array or an object.
///
/// # Example
/// ```
/// let value = jsonast::parse("[1, 2, 3]").unwrap();
/// assert_eq!(value.as_array().map(|a| a.len()), Some(3));
///
/// assert!(jsonast::parse("42").is_err());
/// ```
pub fn parse(text: &str) -> Result<Value> {
    Parser::from_str(text).parse_document()
}

/// Like [`parse`], with explicit limits.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value> {
    Parser::from_str(text)
        .with_options(options)
        .parse_document()
}

/// Parse a UTF-8 document pulled incrementally from `reader`.
///
/// Invalid UTF-8 fails with [`JsonError::InvalidUtf8`], read failures with
/// [`JsonError::Io`].
pub fn parse_reader<R: Read>(reader: R) -> Result<Value> {
    Parser::from_reader(reader).parse_document()
}
