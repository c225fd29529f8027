//! The Unicode-aware byte-to-codepoint tokenizer.
//!
//! A [`Tokenizer`] decodes a borrowed UTF-8 byte buffer into a lazy sequence
//! of validated codepoints with one codepoint of lookahead, while tracking
//! the line/column position and byte offsets needed for error reporting.

use thiserror::Error;

use crate::position::TextPosition;

/// Codepoints below this value are control characters and may only appear in
/// JSON text when they are one of the whitespace exceptions.
const CHARACTER_MIN: u32 = 0x20;

/// Failure to decode the next codepoint from the buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeError {
    /// A byte sequence that is not well-formed UTF-8: a stray continuation
    /// byte, a 5- or 6-byte leader, a continuation byte that does not match
    /// `10xxxxxx`, or a sequence truncated by the end of the buffer.
    #[error("invalid UTF-8 encoding")]
    InvalidEncoding,
    /// A well-formed sequence decoding to a codepoint JSON text may not
    /// contain: a control character below U+0020 other than tab, line feed
    /// or carriage return, a UTF-16 surrogate, or a value above U+10FFFF.
    #[error("codepoint out of range")]
    CodepointOutOfRange,
}

/// One decoded codepoint together with where it sits in the buffer.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Byte offset of the first byte of the codepoint. After a consume at
    /// end-of-input this points one past the final byte.
    offset: usize,
    /// Encoded width in bytes; zero before the first consume and at
    /// end-of-input.
    width: usize,
    /// The decoded codepoint, `None` before the first consume and at
    /// end-of-input.
    ch: Option<char>,
    position: TextPosition,
}

impl Cursor {
    const fn start() -> Self {
        Self {
            offset: 0,
            width: 0,
            ch: None,
            position: TextPosition::start(),
        }
    }
}

/// Decodes a borrowed buffer codepoint by codepoint.
///
/// The tokenizer keeps two cursor slots: `current`, describing the last
/// consumed codepoint, and an optional `next` cache filled by
/// [`peek_next`](Tokenizer::peek_next). Peeking is idempotent until
/// [`consume_one`](Tokenizer::consume_one) invalidates the cache, and
/// consuming at end-of-input is a successful no-op.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    buffer: &'a [u8],
    current: Cursor,
    next: Option<Cursor>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `buffer` with nothing consumed yet.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            current: Cursor::start(),
            next: None,
        }
    }

    /// Returns the next codepoint without advancing, or `None` at
    /// end-of-input. Repeated calls return the cached, identical result.
    pub fn peek_next(&mut self) -> Result<Option<char>, UnicodeError> {
        if let Some(next) = &self.next {
            return Ok(next.ch);
        }

        let offset = self.current.offset + self.current.width;
        let Some((ch, width)) = decode_at(self.buffer, offset)? else {
            return Ok(None);
        };

        self.next = Some(Cursor {
            offset,
            width,
            ch: Some(ch),
            position: advance_position(self.current.position, ch),
        });
        Ok(Some(ch))
    }

    /// Advances past the next codepoint, re-validating it through the same
    /// decode path as [`peek_next`](Tokenizer::peek_next).
    ///
    /// At end-of-input this succeeds without moving the position, but the
    /// byte cursor settles one past the final byte so that errors raised
    /// there point at the end of the buffer.
    pub fn consume_one(&mut self) -> Result<(), UnicodeError> {
        if let Some(next) = self.next.take() {
            self.current = next;
            return Ok(());
        }

        let offset = self.current.offset + self.current.width;
        match decode_at(self.buffer, offset)? {
            Some((ch, width)) => {
                self.current = Cursor {
                    offset,
                    width,
                    ch: Some(ch),
                    position: advance_position(self.current.position, ch),
                };
            }
            None => {
                self.current.offset = offset.min(self.buffer.len());
                self.current.width = 0;
                self.current.ch = None;
            }
        }
        Ok(())
    }

    /// The last consumed codepoint, if any.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        self.current.ch
    }

    /// Line/column of the last consumed codepoint.
    #[must_use]
    pub fn source_position(&self) -> TextPosition {
        self.current.position
    }

    /// Byte offset of the first byte of the last consumed codepoint.
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.current.offset
    }

    /// Byte offset one past the last consumed codepoint, i.e. where the next
    /// codepoint would start. Used to slice consumed substrings such as
    /// digit runs, and to point at undecodable bytes.
    #[must_use]
    pub fn lookahead_offset(&self) -> usize {
        self.current.offset + self.current.width
    }

    /// The full source buffer this tokenizer borrows.
    #[must_use]
    pub fn source_buffer(&self) -> &'a [u8] {
        self.buffer
    }
}

fn advance_position(position: TextPosition, ch: char) -> TextPosition {
    if ch == '\n' {
        TextPosition::new(position.line + 1, 0)
    } else {
        TextPosition::new(position.line, position.column + 1)
    }
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Decodes the codepoint starting at `offset`, returning it with its encoded
/// width, or `None` at end-of-input.
fn decode_at(buffer: &[u8], offset: usize) -> Result<Option<(char, usize)>, UnicodeError> {
    let Some(&leader) = buffer.get(offset) else {
        return Ok(None);
    };

    let width = match leader {
        0x00..=0x7F => 1,
        byte if byte & 0b1110_0000 == 0b1100_0000 => 2,
        byte if byte & 0b1111_0000 == 0b1110_0000 => 3,
        byte if byte & 0b1111_1000 == 0b1111_0000 => 4,
        // Stray continuation byte or a 5/6-byte leader.
        _ => return Err(UnicodeError::InvalidEncoding),
    };

    let Some(bytes) = buffer.get(offset..offset + width) else {
        return Err(UnicodeError::InvalidEncoding);
    };
    if bytes[1..].iter().any(|&byte| !is_continuation(byte)) {
        return Err(UnicodeError::InvalidEncoding);
    }

    let mut codepoint = if width == 1 {
        u32::from(leader)
    } else {
        u32::from(leader & (0xFFu8 >> (width + 1)))
    };
    for &byte in &bytes[1..] {
        codepoint = codepoint << 6 | u32::from(byte & 0b0011_1111);
    }

    if codepoint < CHARACTER_MIN && !matches!(codepoint, 0x09 | 0x0A | 0x0D) {
        return Err(UnicodeError::CodepointOutOfRange);
    }
    // Surrogates and values above U+10FFFF are representable in the raw bit
    // pattern but are not Unicode scalar values.
    match char::from_u32(codepoint) {
        Some(ch) => Ok(Some((ch, width))),
        None => Err(UnicodeError::CodepointOutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::{Tokenizer, UnicodeError};
    use crate::position::TextPosition;

    #[test]
    fn peek_is_idempotent() {
        let mut tok = Tokenizer::new(b"ab");
        assert_eq!(tok.peek_next(), Ok(Some('a')));
        assert_eq!(tok.peek_next(), Ok(Some('a')));
        assert_eq!(tok.source_position(), TextPosition::start());
    }

    #[test]
    fn consume_advances_position_and_offsets() {
        let mut tok = Tokenizer::new("aé".as_bytes());
        tok.consume_one().unwrap();
        assert_eq!(tok.character(), Some('a'));
        assert_eq!(tok.byte_offset(), 0);
        assert_eq!(tok.lookahead_offset(), 1);
        tok.consume_one().unwrap();
        assert_eq!(tok.character(), Some('é'));
        assert_eq!(tok.byte_offset(), 1);
        assert_eq!(tok.lookahead_offset(), 3);
        assert_eq!(tok.source_position(), TextPosition::new(1, 2));
    }

    #[test]
    fn newline_starts_a_fresh_column() {
        let mut tok = Tokenizer::new(b"a\nb");
        for _ in 0..3 {
            tok.consume_one().unwrap();
        }
        assert_eq!(tok.source_position(), TextPosition::new(2, 1));
    }

    #[test]
    fn consume_at_end_of_input_is_a_noop() {
        let mut tok = Tokenizer::new(b"x");
        tok.consume_one().unwrap();
        let position = tok.source_position();
        tok.consume_one().unwrap();
        tok.consume_one().unwrap();
        assert_eq!(tok.source_position(), position);
        assert_eq!(tok.byte_offset(), 1);
        assert_eq!(tok.peek_next(), Ok(None));
    }

    #[test]
    fn four_byte_sequences_decode() {
        let mut tok = Tokenizer::new("𝄞".as_bytes());
        assert_eq!(tok.peek_next(), Ok(Some('𝄞')));
        tok.consume_one().unwrap();
        assert_eq!(tok.lookahead_offset(), 4);
    }

    #[test]
    fn stray_continuation_byte_is_invalid_encoding() {
        let mut tok = Tokenizer::new(b"\x80");
        assert_eq!(tok.peek_next(), Err(UnicodeError::InvalidEncoding));
    }

    #[test]
    fn five_byte_leader_is_invalid_encoding() {
        let mut tok = Tokenizer::new(b"\xF8\x80\x80\x80\x80");
        assert_eq!(tok.peek_next(), Err(UnicodeError::InvalidEncoding));
    }

    #[test]
    fn truncated_sequence_is_invalid_encoding() {
        let mut tok = Tokenizer::new(b"\xC3");
        assert_eq!(tok.peek_next(), Err(UnicodeError::InvalidEncoding));
    }

    #[test]
    fn mismatched_continuation_is_invalid_encoding() {
        let mut tok = Tokenizer::new(b"\xC3\x28");
        assert_eq!(tok.peek_next(), Err(UnicodeError::InvalidEncoding));
    }

    #[test]
    fn control_characters_are_out_of_range() {
        let mut tok = Tokenizer::new(b"\x01");
        assert_eq!(tok.peek_next(), Err(UnicodeError::CodepointOutOfRange));
    }

    #[test]
    fn whitespace_controls_are_allowed() {
        let mut tok = Tokenizer::new(b"\t\r\n ");
        for expected in ['\t', '\r', '\n', ' '] {
            assert_eq!(tok.peek_next(), Ok(Some(expected)));
            tok.consume_one().unwrap();
        }
    }

    #[test]
    fn surrogate_encoding_is_out_of_range() {
        // U+D800 encoded as three bytes.
        let mut tok = Tokenizer::new(b"\xED\xA0\x80");
        assert_eq!(tok.peek_next(), Err(UnicodeError::CodepointOutOfRange));
    }

    #[test]
    fn failed_peek_does_not_advance() {
        let mut tok = Tokenizer::new(b"a\x80b");
        tok.consume_one().unwrap();
        assert_eq!(tok.peek_next(), Err(UnicodeError::InvalidEncoding));
        assert_eq!(tok.character(), Some('a'));
        assert_eq!(tok.lookahead_offset(), 1);
    }
}
