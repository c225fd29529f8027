//! A JSON parser and value library with precise, annotated diagnostics.
//!
//! `netjson` parses UTF-8 encoded JSON text into a [`Value`] tree and, on
//! failure, reports exactly what went wrong and where: every [`ParseError`]
//! carries the failure reason, the line/column of the codepoint it blames,
//! and the byte offset into the source buffer, and renders as a multi-line
//! diagnostic with a caret-annotated snippet of the offending line.
//!
//! Numbers keep their textual nature: integers parse to `i64` and numbers
//! with a fraction or exponent to `f64`, and the two never compare equal.
//! Objects are generic over a [storage policy](storage::ObjectStorage)
//! chosen at the type level, covering the four combinations of
//! insertion-ordered/sorted/hashed layout and duplicate-key handling.
//!
//! # Examples
//!
//! ```
//! use netjson::{Value, parse};
//!
//! let value = parse(br#"{"name": "example", "tags": [1, 2]}"#)?;
//! let object = value.as_object().unwrap();
//! assert_eq!(object.find("name").and_then(Value::as_str), Some("example"));
//! assert_eq!(object.member_type("tags"), Some(netjson::JsonType::Array));
//! # Ok::<(), netjson::ParseError<'static>>(())
//! ```
//!
//! A failed parse renders a diagnostic pointing at the problem:
//!
//! ```
//! use netjson::parse;
//!
//! let err = parse(b"[1, 2,, 3]").unwrap_err();
//! println!("{err}");
//! ```

#![allow(missing_docs)]

mod error;
mod object;
mod parser;
mod position;
pub mod storage;
#[cfg(test)]
mod tests;
mod tokenizer;
mod value;

pub use error::{ParseError, ParseErrorReason};
pub use object::Object;
pub use parser::{DEFAULT_MAX_DEPTH, ParserOptions, parse, parse_with};
pub use position::TextPosition;
pub use tokenizer::{Tokenizer, UnicodeError};
pub use value::{Array, JsonType, Value};
