//! The structured parse-error model and its diagnostic renderer.
//!
//! A [`ParseError`] records the failure reason, the line/column of the
//! codepoint it blames, the borrowed source buffer, and the byte offset of
//! the offending byte. [`ParseError::render`] turns that record into a
//! human-readable diagnostic with an annotated snippet of the source line.

use core::fmt;

use bstr::ByteSlice;
use thiserror::Error;

use crate::position::TextPosition;
use crate::tokenizer::UnicodeError;

/// How many codepoints of context to show on each side of the offending
/// byte.
const CONTEXT_CODEPOINTS: usize = 20;

/// Every distinguishable grammar and encoding failure.
///
/// The `Display` impl is the human-readable reason sentence used in
/// rendered diagnostics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorReason {
    /// See [`UnicodeError::InvalidEncoding`].
    #[error(
        "Invalid UTF-8 encoding. Encountered sequence of bytes, which cannot be decoded as UTF-8."
    )]
    InvalidUtf8Encoding,
    /// See [`UnicodeError::CodepointOutOfRange`].
    #[error(
        "UTF-8 codepoint out of range. Supported codepoints in json are: 0x0020-0x10FFFF, 0x000A, 0x000D, 0x0009."
    )]
    CodepointOutOfRange,
    #[error("Invalid integer. Integers starting from digit 0 cannot be followed by other digits.")]
    Integer0WithMultipleDigits,
    #[error("Invalid integer. Integer started with '-' sign, but no digits follow '-'.")]
    IntegerMinusWithoutDigits,
    #[error("Invalid fraction part. Numbers with fraction part must contain digits after '.'.")]
    FractionNoDigitsAfterDot,
    #[error(
        "Invalid exponent in number. 'e'/'E' characters must be followed by optional sign, and mandatory digits."
    )]
    InvalidCharacterAfterExponent,
    #[error("Could not create number out of the matched text.")]
    NumberCouldNotBeParsed,
    #[error("Invalid hex character. Hex character needs to be in range 0-9, a-f, or A-F.")]
    HexInvalid,
    #[error(
        r#"Invalid escaped character. After '\' only limited characters are allowed [", \, /, b, f, n, r, t, u[hex,hex,hex,hex]]."#
    )]
    EscapedCharacterInvalid,
    #[error(r#"Invalid string. When parsing string, ending '"' character was not found."#)]
    StringMissingFinishingQuote,
    #[error(
        "Probable typo. Unexpected character while parsing one of following values: true, false, null."
    )]
    InvalidCharacterTypo,
    #[error("No value. Expected value, but could not parse any.")]
    CouldNotMatchAnyValueType,
    #[error("Missing colon after key. Keys in object must be followed by ':'.")]
    MissingColonAfterKey,
    #[error("Missing value after key. Object's key does not have any associated value.")]
    ExpectedElementAfterKey,
    #[error("Redundant comma. Last element in object and array cannot be followed by comma.")]
    ExpectedBrace,
    #[error("Invalid object. After parsing objects members, ending '}}' character was not found.")]
    ExpectedClosingBrace,
    #[error("Invalid array. After parsing arrays elements, ending ']' character was not found.")]
    ExpectedClosingBracket,
    #[error("Remaining data after parse. Json parsing finished, but there is still some data left.")]
    RemainingDataAfterJsonParse,
    #[error("Nesting too deep. Object and array nesting exceeded the configured depth limit.")]
    NestingTooDeep,
}

impl ParseErrorReason {
    /// Whether this reason came from the byte-to-codepoint decoding layer.
    /// Encoding errors render without a context snippet, since the source
    /// around the failure is not reliably printable.
    #[must_use]
    pub fn is_encoding_error(self) -> bool {
        matches!(
            self,
            ParseErrorReason::InvalidUtf8Encoding | ParseErrorReason::CodepointOutOfRange
        )
    }
}

impl From<UnicodeError> for ParseErrorReason {
    fn from(err: UnicodeError) -> Self {
        match err {
            UnicodeError::InvalidEncoding => ParseErrorReason::InvalidUtf8Encoding,
            UnicodeError::CodepointOutOfRange => ParseErrorReason::CodepointOutOfRange,
        }
    }
}

/// A failed parse: what went wrong and where.
///
/// Constructed once at the failure site and forwarded unchanged to the
/// caller. The error borrows the source buffer so that
/// [`render`](ParseError::render) can extract context around the failure;
/// it must not outlive the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Line/column of the blamed codepoint.
    pub position: TextPosition,
    /// The failure class.
    pub reason: ParseErrorReason,
    /// The full source buffer the parse ran over.
    pub buffer: &'a [u8],
    /// Offset of the offending byte in `buffer`; `buffer.len()` when the
    /// failure is at end-of-input.
    pub byte_offset: usize,
}

impl ParseError<'_> {
    /// Renders a multi-line human-readable diagnostic.
    ///
    /// The first part names the position and reason. For non-encoding
    /// errors a context snippet follows: the source line fragment around
    /// the offending byte (clipped to [`CONTEXT_CODEPOINTS`] on each side
    /// and to the enclosing line), with whitespace characters escaped, and
    /// a marker line pointing a caret at the offending column.
    ///
    /// Rendering is pure and total: the same error renders to the same
    /// string, and no input buffer or offset can make it fail.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "Parsing failed at position [line:column] {}\nReason: {}\n\n",
            self.position, self.reason
        );
        if self.reason.is_encoding_error() {
            return out;
        }

        let mark = self.byte_offset.min(self.buffer.len());
        let start = fragment_start(self.buffer, mark, CONTEXT_CODEPOINTS);
        let end = fragment_end(self.buffer, mark, CONTEXT_CODEPOINTS);

        // Codepoints between the fragment start and the mark; escaping a
        // whitespace character left of the mark widens the line by one
        // column, so the caret shifts with it.
        let mut caret = self.buffer[start..mark].chars().count();
        let mut line = String::with_capacity(end - start);
        for (offset, _, ch) in self.buffer[start..end].char_indices() {
            let escaped = match ch {
                '\n' => Some("\\n"),
                '\t' => Some("\\t"),
                '\r' => Some("\\r"),
                '\u{c}' => Some("\\f"),
                '\u{b}' => Some("\\v"),
                _ => None,
            };
            match escaped {
                Some(escape) => {
                    line.push_str(escape);
                    if start + offset < mark {
                        caret += 1;
                    }
                }
                None => line.push(ch),
            }
        }

        let mut marker = String::with_capacity(caret + 4);
        for i in (0..caret).rev() {
            marker.push(if i < 3 { '~' } else { ' ' });
        }
        marker.push('^');
        marker.push_str("~~~");

        out.push_str(&line);
        out.push('\n');
        out.push_str(&marker);
        out
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ParseError<'_> {}

/// Walks back from `mark` up to `max` codepoints, stopping after the
/// closest newline, and returns the fragment start offset.
fn fragment_start(buffer: &[u8], mark: usize, max: usize) -> usize {
    let mut offset = mark;
    let mut remaining = max;
    while remaining > 0 && offset > 0 {
        offset -= 1;
        // Codepoints before the failure point are already-validated UTF-8,
        // so skipping continuation bytes lands on a leader.
        while offset > 0 && buffer[offset] & 0b1100_0000 == 0b1000_0000 {
            offset -= 1;
        }
        if buffer[offset] == b'\n' {
            return offset + 1;
        }
        remaining -= 1;
    }
    offset
}

/// Walks forward from `mark`, consuming up to `max` codepoints, and returns
/// the fragment end offset. Stops early at a newline or at bytes that do
/// not decode (the region past the failure point is untrusted).
fn fragment_end(buffer: &[u8], mark: usize, max: usize) -> usize {
    let mut end = mark;
    let mut consumed = 0;
    for (start, stop, ch) in buffer[mark..].char_indices() {
        if ch == '\n' || ch == char::REPLACEMENT_CHARACTER {
            return mark + start;
        }
        consumed += 1;
        if consumed == max {
            return mark + start;
        }
        end = mark + stop;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::{ParseError, ParseErrorReason, fragment_end, fragment_start};
    use crate::position::TextPosition;

    #[test]
    fn encoding_errors_render_header_only() {
        let buffer = b"\xFF";
        let err = ParseError {
            position: TextPosition::new(1, 0),
            reason: ParseErrorReason::InvalidUtf8Encoding,
            buffer,
            byte_offset: 0,
        };
        let rendered = err.render();
        assert!(rendered.ends_with("\n\n"));
        assert!(!rendered.contains('^'));
    }

    #[test]
    fn rendering_is_idempotent() {
        let buffer = b"tru!";
        let err = ParseError {
            position: TextPosition::new(1, 4),
            reason: ParseErrorReason::InvalidCharacterTypo,
            buffer,
            byte_offset: 3,
        };
        assert_eq!(err.render(), err.render());
    }

    #[test]
    fn caret_at_buffer_start_degrades_gracefully() {
        let err = ParseError {
            position: TextPosition::new(1, 0),
            reason: ParseErrorReason::CouldNotMatchAnyValueType,
            buffer: b"",
            byte_offset: 0,
        };
        assert!(err.render().ends_with("^~~~"));
    }

    #[test]
    fn fragment_clips_at_newlines() {
        let buffer = b"first\nsecond\nthird";
        // Mark at 's' of "second".
        assert_eq!(fragment_start(buffer, 6, 20), 6);
        assert_eq!(fragment_end(buffer, 6, 20), 12);
    }

    #[test]
    fn fragment_clips_at_the_codepoint_budget() {
        let buffer = [b'a'; 64];
        assert_eq!(fragment_start(&buffer, 40, 20), 20);
        // The twentieth forward codepoint is excluded.
        assert_eq!(fragment_end(&buffer, 0, 20), 19);
    }

    #[test]
    fn fragment_stops_at_undecodable_bytes() {
        let buffer = b"ab\xFFcd";
        assert_eq!(fragment_end(buffer, 0, 20), 2);
    }

    #[test]
    fn escaped_whitespace_shifts_the_caret() {
        // "a\tb" with the mark on 'b': the tab escapes to two characters,
        // so the caret moves from column 2 to column 3.
        let buffer = b"a\tb";
        let err = ParseError {
            position: TextPosition::new(1, 3),
            reason: ParseErrorReason::InvalidCharacterTypo,
            buffer,
            byte_offset: 2,
        };
        let rendered = err.render();
        let mut lines = rendered.lines().rev();
        assert_eq!(lines.next(), Some("~~~^~~~"));
        assert_eq!(lines.next(), Some("a\\tb"));
    }
}
