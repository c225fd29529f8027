use rstest::rstest;

use crate::{JsonType, Value, parse};

#[rstest]
#[case(b"null", Value::Null)]
#[case(b"true", Value::Boolean(true))]
#[case(b"false", Value::Boolean(false))]
#[case(b"0", Value::Integer(0))]
#[case(b"-12", Value::Integer(-12))]
#[case(br#""""#, Value::String(String::new()))]
#[case(br#""text""#, Value::String("text".into()))]
#[case(b"[]", Value::Array(vec![]))]
#[case(b"{}", Value::Object(crate::Object::new()))]
fn scalar_documents_parse(#[case] input: &[u8], #[case] expected: Value) {
    assert_eq!(parse(input), Ok(expected));
}

#[test]
fn nested_containers_parse() {
    let value = parse(br#"{"property": {"nested": ["string", 1, 2, 3]}}"#).unwrap();

    let outer = value.as_object().unwrap();
    assert_eq!(outer.len(), 1);
    assert_eq!(outer.member_type("property"), Some(JsonType::Object));

    let inner = outer.find("property").and_then(Value::as_object).unwrap();
    assert!(inner.contains("nested"));
    let nested = inner.find("nested").and_then(Value::as_array).unwrap();
    assert_eq!(
        nested,
        &vec![
            Value::String("string".into()),
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
        ]
    );
}

#[test]
fn arrays_keep_element_order_and_heterogeneous_types() {
    let value = parse(br#"[null, true, 2, 2.5, "x", [], {}]"#).unwrap();
    let array = value.as_array().unwrap();
    let kinds: Vec<_> = array.iter().map(Value::kind).collect();
    assert_eq!(
        kinds,
        vec![
            JsonType::Null,
            JsonType::Boolean,
            JsonType::Integer,
            JsonType::FloatingPoint,
            JsonType::String,
            JsonType::Array,
            JsonType::Object,
        ]
    );
}

#[test]
fn document_may_be_surrounded_by_whitespace() {
    assert_eq!(parse(b" \t\r\n true \t\r\n "), Ok(Value::Boolean(true)));
}

#[test]
fn deep_nesting_within_the_limit_parses() {
    let mut input = Vec::new();
    input.extend_from_slice(&[b'['; 100]);
    input.push(b'1');
    input.extend_from_slice(&[b']'; 100]);

    let mut value = parse(&input).unwrap();
    for _ in 0..100 {
        let array = match value {
            Value::Array(array) => array,
            other => panic!("expected array, got {other:?}"),
        };
        assert_eq!(array.len(), 1);
        value = array.into_iter().next().unwrap();
    }
    assert_eq!(value, Value::Integer(1));
}
