use rstest::rstest;

use crate::{Value, parse};

#[rstest]
#[case(br#""\"""#, "\"")]
#[case(br#""\\""#, "\\")]
#[case(br#""\/""#, "/")]
#[case(br#""\b""#, "\u{8}")]
#[case(br#""\f""#, "\u{c}")]
#[case(br#""\n""#, "\n")]
#[case(br#""\r""#, "\r")]
#[case(br#""\t""#, "\t")]
fn simple_escapes_decode(#[case] input: &[u8], #[case] expected: &str) {
    assert_eq!(parse(input), Ok(Value::String(expected.into())));
}

#[rstest]
#[case(0x0041, "A")]
#[case(0x0000, "\0")]
#[case(0x0009, "\t")]
#[case(0x00E9, "\u{e9}")]
#[case(0x20AC, "\u{20ac}")]
#[case(0x263A, "\u{263a}")]
fn unicode_escapes_decode(#[case] code: u32, #[case] expected: &str) {
    let upper = format!("\"\\u{code:04X}\"");
    assert_eq!(parse(upper.as_bytes()), Ok(Value::String(expected.into())));
    let lower = format!("\"\\u{code:04x}\"");
    assert_eq!(parse(lower.as_bytes()), Ok(Value::String(expected.into())));
}

#[rstest]
#[case("привет")]
#[case("日本語のテキスト")]
#[case("mixed päyload 𝄞")]
fn multi_byte_text_survives_unchanged(#[case] text: &str) {
    let input = format!("\"{text}\"");
    assert_eq!(parse(input.as_bytes()), Ok(Value::String(text.into())));
}

#[test]
fn escapes_compose_inside_longer_strings() {
    let input = r#""line one\nline \"two\"\t☺""#;
    let value = parse(input.as_bytes()).unwrap();
    assert_eq!(value.as_str(), Some("line one\nline \"two\"\t\u{263a}"));
}

#[test]
fn string_content_keeps_raw_whitespace_codepoints() {
    // Tab, line feed and carriage return pass the codepoint filter and are
    // taken literally inside a string.
    let value = parse(b"\"a\tb\nc\"").unwrap();
    assert_eq!(value.as_str(), Some("a\tb\nc"));
}
