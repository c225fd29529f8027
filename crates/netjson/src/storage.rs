//! Pluggable storage policies for object members.
//!
//! The JSON grammar does not say what an object *is* beyond an ordered list
//! of key/value members, so the container backing an [`Object`] is a
//! compile-time policy. Two axes matter: whether repeated keys keep every
//! occurrence (`STORES_DUPLICATES`) and how members are ordered. All
//! policies accept borrowed `&str` lookup keys against their owned `String`
//! keys, so heterogeneous ("transparent") lookup needs no opt-in flag.
//!
//! [`Object`]: crate::object::Object

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use crate::value::Value;

/// A container of `String`-keyed [`Value`]s selected at the type level.
///
/// Implementations decide ordering and duplicate handling; the parser only
/// ever calls [`insert`](ObjectStorage::insert), so a policy's insertion
/// semantics (append vs. overwrite) fully determine how duplicate keys in
/// the source text behave.
pub trait ObjectStorage: Clone + Debug + Default + PartialEq + Sized {
    /// Whether repeated insertions of one key keep every occurrence.
    const STORES_DUPLICATES: bool;

    /// Inserts one member. Policies without duplicates overwrite the
    /// previous value of `key` (insert-or-assign); the others append.
    fn insert(&mut self, key: String, value: Value<Self>);

    /// The value stored under `key`; the first occurrence in insertion
    /// order when the policy keeps duplicates.
    fn find(&self, key: &str) -> Option<&Value<Self>>;

    /// All values stored under `key`, in insertion order.
    fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<Self>>;

    /// Number of values stored under `key`.
    fn count(&self, key: &str) -> usize {
        self.find_all(key).count()
    }

    /// Removes every value stored under `key`, returning how many were
    /// removed.
    fn erase(&mut self, key: &str) -> usize;

    /// Total number of stored members, duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates all members in the policy's order.
    fn iter(&self) -> impl Iterator<Item = (&str, &Value<Self>)>;
}

/// Members in insertion order; duplicate keys keep every occurrence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreserveOrderDuplicates {
    entries: Vec<(String, Value<Self>)>,
}

impl ObjectStorage for PreserveOrderDuplicates {
    const STORES_DUPLICATES: bool = true;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.entries.push((key, value));
    }

    fn find(&self, key: &str) -> Option<&Value<Self>> {
        self.entries
            .iter()
            .find(|(stored, _)| stored == key)
            .map(|(_, value)| value)
    }

    fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<Self>> {
        self.entries
            .iter()
            .filter(move |(stored, _)| stored == key)
            .map(|(_, value)| value)
    }

    fn erase(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(stored, _)| stored != key);
        before - self.entries.len()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value<Self>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Members sorted by key; duplicate keys keep every occurrence, ordered by
/// insertion within one key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedDuplicates {
    entries: BTreeMap<String, Vec<Value<Self>>>,
}

impl ObjectStorage for SortedDuplicates {
    const STORES_DUPLICATES: bool = true;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.entries.entry(key).or_default().push(value);
    }

    fn find(&self, key: &str) -> Option<&Value<Self>> {
        self.entries.get(key).and_then(|values| values.first())
    }

    fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<Self>> {
        self.entries.get(key).into_iter().flatten()
    }

    fn erase(&mut self, key: &str) -> usize {
        self.entries.remove(key).map_or(0, |values| values.len())
    }

    fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value<Self>)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value)))
    }
}

/// Members sorted by key; at most one value per key, last write wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedNoDuplicates {
    entries: BTreeMap<String, Value<Self>>,
}

impl ObjectStorage for SortedNoDuplicates {
    const STORES_DUPLICATES: bool = false;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.entries.insert(key, value);
    }

    fn find(&self, key: &str) -> Option<&Value<Self>> {
        self.entries.get(key)
    }

    fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<Self>> {
        self.entries.get(key).into_iter()
    }

    fn erase(&mut self, key: &str) -> usize {
        usize::from(self.entries.remove(key).is_some())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value<Self>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Members in hash order; at most one value per key, last write wins.
///
/// This is the default policy, matching the most common reading of a JSON
/// object as an unordered map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HashedNoDuplicates {
    entries: HashMap<String, Value<Self>>,
}

impl ObjectStorage for HashedNoDuplicates {
    const STORES_DUPLICATES: bool = false;

    fn insert(&mut self, key: String, value: Value<Self>) {
        self.entries.insert(key, value);
    }

    fn find(&self, key: &str) -> Option<&Value<Self>> {
        self.entries.get(key)
    }

    fn find_all(&self, key: &str) -> impl Iterator<Item = &Value<Self>> {
        self.entries.get(key).into_iter()
    }

    fn erase(&mut self, key: &str) -> usize {
        usize::from(self.entries.remove(key).is_some())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value<Self>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}
