//! The object container built by the parser for `{...}` productions.

use crate::storage::{HashedNoDuplicates, ObjectStorage};
use crate::value::{JsonType, Value};

/// A mapping from string keys to [`Value`]s with a pluggable storage policy.
///
/// `Object` is a thin facade over an [`ObjectStorage`]; ordering and
/// duplicate-key behavior come entirely from the policy type parameter.
/// Lookups take `&str`, so any key-like borrow works without allocating.
///
/// # Examples
///
/// ```
/// use netjson::{Object, Value};
///
/// let mut object: Object = Object::new();
/// object.insert("answer", Value::Integer(42));
/// assert!(object.contains("answer"));
/// assert_eq!(object.get_member("answer"), Some(&Value::Integer(42)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object<S: ObjectStorage = HashedNoDuplicates> {
    storage: S,
}

impl<S: ObjectStorage> Object<S> {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: S::default(),
        }
    }

    /// Inserts one member according to the storage policy: duplicate-keeping
    /// policies append, the others overwrite the previous value of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value<S>) {
        self.storage.insert(key.into(), value);
    }

    /// The value stored under `key`, or `None`. With a duplicate-keeping
    /// policy this is the first occurrence in insertion order.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Value<S>> {
        self.storage.find(key)
    }

    /// Alias for [`find`](Object::find), mirroring member access by name.
    #[must_use]
    pub fn get_member(&self, key: &str) -> Option<&Value<S>> {
        self.storage.find(key)
    }

    /// Whether any member is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.storage.find(key).is_some()
    }

    /// The variant tag of the member stored under `key`, if present.
    #[must_use]
    pub fn member_type(&self, key: &str) -> Option<JsonType> {
        self.storage.find(key).map(Value::kind)
    }

    /// All values stored under `key`, in insertion order.
    pub fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<S>> {
        self.storage.find_all(key)
    }

    /// Number of values stored under `key`.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.storage.count(key)
    }

    /// Removes every value stored under `key`, returning how many were
    /// removed.
    pub fn erase(&mut self, key: &str) -> usize {
        self.storage.erase(key)
    }

    /// Total number of members, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates all members in the storage policy's order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<S>)> {
        self.storage.iter()
    }

    /// Borrows the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the object, returning the underlying storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: ObjectStorage> FromIterator<(String, Value<S>)> for Object<S> {
    fn from_iter<I: IntoIterator<Item = (String, Value<S>)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}
