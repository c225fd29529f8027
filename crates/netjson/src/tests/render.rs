use insta::assert_snapshot;

use crate::parse;

#[test]
fn unterminated_string_diagnostic() {
    let err = parse(b"\"abcd").unwrap_err();
    assert_snapshot!(err.render(), @r#"
    Parsing failed at position [line:column] 1:5
    Reason: Invalid string. When parsing string, ending '"' character was not found.

    "abcd
      ~~~^~~~
    "#);
}

#[test]
fn missing_closing_brace_diagnostic() {
    let err = parse(b"{\n\"a\": 1,\n\"b\": {\n}").unwrap_err();
    assert_snapshot!(err.render(), @r"
    Parsing failed at position [line:column] 4:1
    Reason: Invalid object. After parsing objects members, ending '}' character was not found.

    }
    ~^~~~
    ");
}

#[test]
fn missing_comma_between_members_diagnostic() {
    let input = b"{\n    \"property\": {\n        \"nestedProperty1\": 1\n       \"nestedProperty2\": 2\n    }\n}";
    let err = parse(input).unwrap_err();
    // The fragment ends with a space, so the expectation is spelled out
    // line by line.
    let expected = [
        "Parsing failed at position [line:column] 4:8",
        "Reason: Invalid object. After parsing objects members, ending '}' character was not found.",
        "",
        "       \"nestedProperty2\": ",
        "    ~~~^~~~",
    ]
    .join("\n");
    assert_eq!(err.render(), expected);
}

#[test]
fn encoding_errors_render_without_a_snippet() {
    let err = parse(b"\xFF").unwrap_err();
    assert_eq!(
        err.render(),
        "Parsing failed at position [line:column] 1:0\n\
         Reason: Invalid UTF-8 encoding. Encountered sequence of bytes, which cannot be decoded as UTF-8.\n\n"
    );
}

#[test]
fn long_lines_are_clipped_to_the_context_window() {
    let mut input = vec![b'"'];
    input.extend_from_slice(&[b'a'; 30]);
    let err = parse(&input).unwrap_err();
    let rendered = err.render();
    let mut lines = rendered.lines().rev();
    assert_eq!(lines.next(), Some("                 ~~~^~~~"));
    assert_eq!(lines.next(), Some("aaaaaaaaaaaaaaaaaaaa"));
}

#[test]
fn display_matches_render() {
    let err = parse(b"tru!").unwrap_err();
    assert_eq!(err.to_string(), err.render());
}
