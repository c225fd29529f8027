//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum representing any parsed JSON
//! datum, the [`JsonType`] variant tag, and the compact serializer behind
//! `Value`'s `Display` impl.

use core::fmt;

use crate::object::Object;
use crate::storage::{HashedNoDuplicates, ObjectStorage};

/// An ordered, growable sequence of values, owning its elements.
pub type Array<S = HashedNoDuplicates> = Vec<Value<S>>;

/// The variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    FloatingPoint,
    Integer,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::FloatingPoint => "floating point",
            JsonType::Integer => "integer",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        })
    }
}

/// A JSON value as defined by [RFC 8259], with numbers split into integer
/// and floating-point variants.
///
/// The storage policy `S` decides how object members are kept; see
/// [`ObjectStorage`]. Equality is deep and variant-aware: two values are
/// equal iff they carry the same tag and recursively equal payloads. There
/// is no implicit coercion between variants, so `Integer(1)` and
/// `Float(1.0)` are not equal.
///
/// # Examples
///
/// ```
/// use netjson::{Object, Value};
///
/// let mut object: Object = Object::new();
/// object.insert("key", Value::String("value".into()));
/// let v = Value::Object(object);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Value<S: ObjectStorage = HashedNoDuplicates> {
    Null,
    Boolean(bool),
    Float(f64),
    Integer(i64),
    String(String),
    Array(Array<S>),
    Object(Object<S>),
}

impl<S: ObjectStorage> Default for Value<S> {
    fn default() -> Self {
        Self::Null
    }
}

impl<S: ObjectStorage> Value<S> {
    /// Returns the variant tag of this value.
    #[must_use]
    pub fn kind(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Boolean(_) => JsonType::Boolean,
            Value::Float(_) => JsonType::FloatingPoint,
            Value::Integer(_) => JsonType::Integer,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Float`](Value::Float).
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is [`Integer`](Value::Integer).
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean payload, if this is a [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The float payload, if this is a [`Float`](Value::Float).
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The integer payload, if this is an [`Integer`](Value::Integer).
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The string payload, if this is a [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The element slice, if this is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array<S>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The object payload, if this is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Object<S>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable access to the elements, if this is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array<S>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable access to the object, if this is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Object<S>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl<S: ObjectStorage> From<bool> for Value<S> {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl<S: ObjectStorage> From<f64> for Value<S> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<S: ObjectStorage> From<i64> for Value<S> {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl<S: ObjectStorage> From<String> for Value<S> {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<S: ObjectStorage> From<&str> for Value<S> {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl<S: ObjectStorage> From<Array<S>> for Value<S> {
    fn from(v: Array<S>) -> Self {
        Self::Array(v)
    }
}

impl<S: ObjectStorage> From<Object<S>> for Value<S> {
    fn from(v: Object<S>) -> Self {
        Self::Object(v)
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes and control characters up to the basic multilingual
/// plane are replaced with their JSON escape sequences.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl<S: ObjectStorage> fmt::Display for Value<S> {
    /// Serializes the value as compact JSON text.
    ///
    /// Floats print in a round-trippable form (`2.0`, not `2`), so a float
    /// never re-parses as an integer. Only finite floats produce valid JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(object) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in object.iter() {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonType, Value};
    use crate::object::Object;

    #[test]
    fn kind_matches_variant() {
        let v: Value = Value::Integer(3);
        assert_eq!(v.kind(), JsonType::Integer);
        assert!(v.is_integer());
        assert_eq!(v.as_integer(), Some(3));
        assert_eq!(v.as_float(), None);
    }

    #[test]
    fn no_coercion_between_numeric_variants() {
        let integer: Value = Value::Integer(1);
        let float: Value = Value::Float(1.0);
        assert_ne!(integer, float);
    }

    #[test]
    fn serializes_compact_json() {
        let v: Value = Value::Array(vec![
            Value::Null,
            Value::Boolean(true),
            Value::Integer(-7),
            Value::Float(2.0),
            Value::String("a\"b".into()),
        ]);
        assert_eq!(v.to_string(), r#"[null,true,-7,2.0,"a\"b"]"#);
    }

    #[test]
    fn escapes_control_characters() {
        let v: Value = Value::String("line\nbreak\u{1}".into());
        assert_eq!(v.to_string(), "\"line\\u000Abreak\\u0001\"");
    }

    #[test]
    fn empty_object_serializes_to_braces() {
        let v: Value = Value::Object(Object::new());
        assert_eq!(v.to_string(), "{}");
    }
}
