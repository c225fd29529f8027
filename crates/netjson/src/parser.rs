//! The recursive-descent JSON parser.
//!
//! One method per grammar production, each returning a tri-state result:
//! `Ok(Some(..))` when the production matched and was fully consumed,
//! `Ok(None)` when the input does not start this production (nothing
//! consumed beyond shared lookahead), and `Err(..)` when the production
//! started but cannot complete. Errors are constructed once at the failure
//! site and forwarded to the caller unchanged.

use core::marker::PhantomData;

use crate::error::{ParseError, ParseErrorReason};
use crate::object::Object;
use crate::storage::{HashedNoDuplicates, ObjectStorage};
use crate::tokenizer::{Tokenizer, UnicodeError};
use crate::value::{Array, Value};

/// Containers may nest this deep before parsing fails with
/// [`ParseErrorReason::NestingTooDeep`], unless overridden through
/// [`ParserOptions`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a parse run.
///
/// # Examples
///
/// ```
/// use netjson::{ParserOptions, parse_with, storage::HashedNoDuplicates};
///
/// let options = ParserOptions { max_depth: 4 };
/// assert!(parse_with::<HashedNoDuplicates>(b"[[[[1]]]]", options).is_ok());
/// assert!(parse_with::<HashedNoDuplicates>(b"[[[[[1]]]]]", options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open objects and arrays.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses a complete JSON document with the default object storage policy
/// and default [`ParserOptions`].
///
/// The whole buffer must be one JSON element; trailing non-whitespace data
/// is an error.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first grammar or encoding
/// failure encountered.
///
/// # Examples
///
/// ```
/// use netjson::{Value, parse};
///
/// let value = parse(br#"{"enabled": true}"#)?;
/// let object = value.as_object().unwrap();
/// assert_eq!(object.find("enabled"), Some(&Value::Boolean(true)));
/// # Ok::<(), netjson::ParseError<'static>>(())
/// ```
pub fn parse(input: &[u8]) -> Result<Value, ParseError<'_>> {
    parse_with::<HashedNoDuplicates>(input, ParserOptions::default())
}

/// Parses a complete JSON document with an explicit object storage policy.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first grammar or encoding
/// failure encountered.
pub fn parse_with<S: ObjectStorage>(
    input: &[u8],
    options: ParserOptions,
) -> Result<Value<S>, ParseError<'_>> {
    Parser::new(input, options).parse()
}

/// A parsed number before it is wrapped into a [`Value`] variant.
enum Number {
    Integer(i64),
    Float(f64),
}

struct Parser<'a, S: ObjectStorage> {
    tokenizer: Tokenizer<'a>,
    options: ParserOptions,
    depth: usize,
    _storage: PhantomData<S>,
}

impl<'a, S: ObjectStorage> Parser<'a, S> {
    fn new(input: &'a [u8], options: ParserOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            options,
            depth: 0,
            _storage: PhantomData,
        }
    }

    /// Parses the single element the buffer must consist of.
    fn parse(mut self) -> Result<Value<S>, ParseError<'a>> {
        let value = self.element()?;
        if self.peek()?.is_some() {
            self.advance()?;
            return Err(self.error(ParseErrorReason::RemainingDataAfterJsonParse));
        }
        Ok(value)
    }

    /// An error anchored at the last consumed codepoint.
    fn error(&self, reason: ParseErrorReason) -> ParseError<'a> {
        ParseError {
            position: self.tokenizer.source_position(),
            reason,
            buffer: self.tokenizer.source_buffer(),
            byte_offset: self.tokenizer.byte_offset(),
        }
    }

    /// A decoding error, anchored at the first undecodable byte.
    fn encoding_error(&self, err: UnicodeError) -> ParseError<'a> {
        ParseError {
            position: self.tokenizer.source_position(),
            reason: err.into(),
            buffer: self.tokenizer.source_buffer(),
            byte_offset: self.tokenizer.lookahead_offset(),
        }
    }

    fn peek(&mut self) -> Result<Option<char>, ParseError<'a>> {
        match self.tokenizer.peek_next() {
            Ok(ch) => Ok(ch),
            Err(err) => Err(self.encoding_error(err)),
        }
    }

    fn advance(&mut self) -> Result<(), ParseError<'a>> {
        match self.tokenizer.consume_one() {
            Ok(()) => Ok(()),
            Err(err) => Err(self.encoding_error(err)),
        }
    }

    fn whitespace(&mut self) -> Result<(), ParseError<'a>> {
        while let Some(' ' | '\n' | '\r' | '\t') = self.peek()? {
            self.advance()?;
        }
        Ok(())
    }

    /// `element`: any value surrounded by optional whitespace.
    fn element(&mut self) -> Result<Value<S>, ParseError<'a>> {
        self.whitespace()?;
        let value = if let Some(object) = self.object()? {
            Value::Object(object)
        } else if let Some(array) = self.array()? {
            Value::Array(array)
        } else if let Some(string) = self.string()? {
            Value::String(string)
        } else if let Some(boolean) = self.boolean()? {
            Value::Boolean(boolean)
        } else if self.null()?.is_some() {
            Value::Null
        } else if let Some(number) = self.number()? {
            match number {
                Number::Integer(integer) => Value::Integer(integer),
                Number::Float(float) => Value::Float(float),
            }
        } else {
            return Err(self.error(ParseErrorReason::CouldNotMatchAnyValueType));
        };
        self.whitespace()?;
        Ok(value)
    }

    fn object(&mut self) -> Result<Option<Object<S>>, ParseError<'a>> {
        if self.peek()? != Some('{') {
            return Ok(None);
        }
        self.advance()?;
        self.enter_container()?;
        self.whitespace()?;

        let mut object = Object::new();
        if self.peek()? == Some('}') {
            self.advance()?;
            self.depth -= 1;
            return Ok(Some(object));
        }

        self.members(&mut object)?;
        if self.peek()? != Some('}') {
            self.advance()?;
            return Err(self.error(ParseErrorReason::ExpectedClosingBrace));
        }
        self.advance()?;
        self.depth -= 1;
        Ok(Some(object))
    }

    fn members(&mut self, object: &mut Object<S>) -> Result<(), ParseError<'a>> {
        let Some((key, value)) = self.member()? else {
            // Leave the missing first member to the caller's closing-brace
            // check, which produces the better diagnostic.
            return Ok(());
        };
        object.insert(key, value);

        while self.peek()? == Some(',') {
            self.advance()?;
            match self.member()? {
                Some((key, value)) => object.insert(key, value),
                None => {
                    self.advance()?;
                    return Err(self.error(ParseErrorReason::ExpectedBrace));
                }
            }
        }
        Ok(())
    }

    fn member(&mut self) -> Result<Option<(String, Value<S>)>, ParseError<'a>> {
        self.whitespace()?;
        let Some(key) = self.string()? else {
            return Ok(None);
        };
        self.whitespace()?;
        if self.peek()? != Some(':') {
            self.advance()?;
            return Err(self.error(ParseErrorReason::MissingColonAfterKey));
        }
        self.advance()?;

        match self.element() {
            Ok(value) => Ok(Some((key, value))),
            // A key with nothing parseable after the colon is a more
            // specific failure than "no value", so re-anchor on the
            // offending codepoint and reclassify.
            Err(err) if err.reason == ParseErrorReason::CouldNotMatchAnyValueType => {
                self.advance()?;
                Err(self.error(ParseErrorReason::ExpectedElementAfterKey))
            }
            Err(err) => Err(err),
        }
    }

    fn array(&mut self) -> Result<Option<Array<S>>, ParseError<'a>> {
        if self.peek()? != Some('[') {
            return Ok(None);
        }
        self.advance()?;
        self.enter_container()?;
        self.whitespace()?;

        let mut array = Array::new();
        if self.peek()? == Some(']') {
            self.advance()?;
            self.depth -= 1;
            return Ok(Some(array));
        }

        self.elements(&mut array)?;
        if self.peek()? != Some(']') {
            self.advance()?;
            return Err(self.error(ParseErrorReason::ExpectedClosingBracket));
        }
        self.advance()?;
        self.depth -= 1;
        Ok(Some(array))
    }

    fn elements(&mut self, array: &mut Array<S>) -> Result<(), ParseError<'a>> {
        array.push(self.element()?);
        while self.peek()? == Some(',') {
            self.advance()?;
            array.push(self.element()?);
        }
        Ok(())
    }

    fn string(&mut self) -> Result<Option<String>, ParseError<'a>> {
        if self.peek()? != Some('"') {
            return Ok(None);
        }
        self.advance()?;

        let mut out = String::new();
        while let Some(ch) = self.string_character()? {
            out.push(ch);
        }

        if self.peek()? != Some('"') {
            self.advance()?;
            return Err(self.error(ParseErrorReason::StringMissingFinishingQuote));
        }
        self.advance()?;
        Ok(Some(out))
    }

    /// One codepoint of string content; `None` at the closing quote or at
    /// end-of-input.
    fn string_character(&mut self) -> Result<Option<char>, ParseError<'a>> {
        match self.peek()? {
            None | Some('"') => Ok(None),
            Some('\\') => {
                self.advance()?;
                match self.escaped()? {
                    Some(ch) => Ok(Some(ch)),
                    None => {
                        self.advance()?;
                        Err(self.error(ParseErrorReason::EscapedCharacterInvalid))
                    }
                }
            }
            Some(ch) => {
                self.advance()?;
                Ok(Some(ch))
            }
        }
    }

    /// The character named by an escape sequence, after its `\` was
    /// consumed. `Ok(None)` means the codepoint after `\` names no escape.
    fn escaped(&mut self) -> Result<Option<char>, ParseError<'a>> {
        let simple = match self.peek()? {
            Some(ch @ ('"' | '\\' | '/')) => Some(ch),
            Some('b') => Some('\u{8}'),
            Some('f') => Some('\u{c}'),
            Some('n') => Some('\n'),
            Some('r') => Some('\r'),
            Some('t') => Some('\t'),
            Some('u') => None,
            _ => return Ok(None),
        };
        if let Some(ch) = simple {
            self.advance()?;
            return Ok(Some(ch));
        }
        self.advance()?;

        let mut code: u32 = 0;
        for _ in 0..4 {
            let Some(digit) = self.hex()? else {
                self.advance()?;
                return Err(self.error(ParseErrorReason::HexInvalid));
            };
            code = code * 16 + digit;
        }
        // Unpaired surrogates fall out here.
        match char::from_u32(code) {
            Some(ch) => Ok(Some(ch)),
            None => Err(self.error(ParseErrorReason::CodepointOutOfRange)),
        }
    }

    fn hex(&mut self) -> Result<Option<u32>, ParseError<'a>> {
        match self.peek()?.and_then(|ch| ch.to_digit(16)) {
            Some(digit) => {
                self.advance()?;
                Ok(Some(digit))
            }
            None => Ok(None),
        }
    }

    fn boolean(&mut self) -> Result<Option<bool>, ParseError<'a>> {
        match self.peek()? {
            Some('t') => {
                self.advance()?;
                for expected in ['r', 'u', 'e'] {
                    self.literal_character(expected)?;
                }
                Ok(Some(true))
            }
            Some('f') => {
                self.advance()?;
                for expected in ['a', 'l', 's', 'e'] {
                    self.literal_character(expected)?;
                }
                Ok(Some(false))
            }
            _ => Ok(None),
        }
    }

    fn null(&mut self) -> Result<Option<()>, ParseError<'a>> {
        if self.peek()? != Some('n') {
            return Ok(None);
        }
        self.advance()?;
        for expected in ['u', 'l', 'l'] {
            self.literal_character(expected)?;
        }
        Ok(Some(()))
    }

    /// One mandatory codepoint of a keyword whose first codepoint already
    /// matched.
    fn literal_character(&mut self, expected: char) -> Result<(), ParseError<'a>> {
        if self.peek()? != Some(expected) {
            self.advance()?;
            return Err(self.error(ParseErrorReason::InvalidCharacterTypo));
        }
        self.advance()?;
        Ok(())
    }

    fn number(&mut self) -> Result<Option<Number>, ParseError<'a>> {
        let Some(start) = self.integer()? else {
            return Ok(None);
        };
        let has_fraction = self.fraction()?.is_some();
        let has_exponent = self.exponent()?.is_some();
        let end = self.tokenizer.lookahead_offset();

        let Ok(lexeme) = core::str::from_utf8(&self.tokenizer.source_buffer()[start..end]) else {
            return Err(self.error(ParseErrorReason::NumberCouldNotBeParsed));
        };
        if has_fraction || has_exponent {
            match lexeme.parse::<f64>() {
                Ok(float) if float.is_finite() => Ok(Some(Number::Float(float))),
                _ => Err(self.error(ParseErrorReason::NumberCouldNotBeParsed)),
            }
        } else {
            match lexeme.parse::<i64>() {
                Ok(integer) => Ok(Some(Number::Integer(integer))),
                Err(_) => Err(self.error(ParseErrorReason::NumberCouldNotBeParsed)),
            }
        }
    }

    /// The integer part of a number; returns the byte offset of its first
    /// codepoint so the full lexeme can be sliced out later.
    fn integer(&mut self) -> Result<Option<usize>, ParseError<'a>> {
        let mut start = None;
        if self.peek()? == Some('-') {
            self.advance()?;
            start = Some(self.tokenizer.byte_offset());
        }

        if self.peek()? == Some('0') {
            self.advance()?;
            let start = start.unwrap_or_else(|| self.tokenizer.byte_offset());
            if self.digit()?.is_some() {
                return Err(self.error(ParseErrorReason::Integer0WithMultipleDigits));
            }
            return Ok(Some(start));
        }

        if self.onenine()?.is_none() {
            if start.is_some() {
                return Err(self.error(ParseErrorReason::IntegerMinusWithoutDigits));
            }
            return Ok(None);
        }
        let start = start.unwrap_or_else(|| self.tokenizer.byte_offset());
        while self.digit()?.is_some() {}
        Ok(Some(start))
    }

    fn fraction(&mut self) -> Result<Option<()>, ParseError<'a>> {
        if self.peek()? != Some('.') {
            return Ok(None);
        }
        self.advance()?;
        if !self.digits()? {
            self.advance()?;
            return Err(self.error(ParseErrorReason::FractionNoDigitsAfterDot));
        }
        Ok(Some(()))
    }

    fn exponent(&mut self) -> Result<Option<()>, ParseError<'a>> {
        if !matches!(self.peek()?, Some('e' | 'E')) {
            return Ok(None);
        }
        self.advance()?;
        self.sign()?;
        if !self.digits()? {
            self.advance()?;
            return Err(self.error(ParseErrorReason::InvalidCharacterAfterExponent));
        }
        Ok(Some(()))
    }

    fn sign(&mut self) -> Result<(), ParseError<'a>> {
        if matches!(self.peek()?, Some('+' | '-')) {
            self.advance()?;
        }
        Ok(())
    }

    /// At least one digit; `false` when the next codepoint is not a digit.
    fn digits(&mut self) -> Result<bool, ParseError<'a>> {
        if self.digit()?.is_none() {
            return Ok(false);
        }
        while self.digit()?.is_some() {}
        Ok(true)
    }

    fn digit(&mut self) -> Result<Option<char>, ParseError<'a>> {
        match self.peek()? {
            Some(ch @ '0'..='9') => {
                self.advance()?;
                Ok(Some(ch))
            }
            _ => Ok(None),
        }
    }

    fn onenine(&mut self) -> Result<Option<char>, ParseError<'a>> {
        match self.peek()? {
            Some(ch @ '1'..='9') => {
                self.advance()?;
                Ok(Some(ch))
            }
            _ => Ok(None),
        }
    }

    /// Accounts for entering an object or array; the matching decrement is
    /// at each successful close.
    fn enter_container(&mut self) -> Result<(), ParseError<'a>> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(ParseErrorReason::NestingTooDeep));
        }
        Ok(())
    }
}
