//! Attribute sets: ordered maps from string keys to scalar values.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CanonError;
use crate::value::AttrValue;

/// An unordered key→value coloring, stored key-sorted.
///
/// Backing the set with a `BTreeMap` makes iteration order a function of the
/// contents alone, so two attribute sets built in different insertion orders
/// are indistinguishable. The derived `Ord` compares the key-sorted
/// `(key, value)` pairs lexicographically, which is the cell ordering the
/// color partition builder relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrSet {
    entries: BTreeMap<String, AttrValue>,
}

impl AttrSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key→value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Returns whether the set contains `key` with exactly `value`.
    pub fn contains_pair(&self, key: &str, value: &AttrValue) -> bool {
        self.entries.get(key) == Some(value)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in key-sorted order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, AttrValue> {
        self.entries.iter()
    }

    /// Checks that every value is usable as a hash/equality key.
    pub fn validate(&self) -> Result<(), CanonError> {
        for value in self.entries.values() {
            value.validate()?;
        }
        Ok(())
    }

    /// Returns a copy of the set extended with the given pair.
    pub fn with(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let mut copy = self.clone();
        copy.insert(key, value);
        copy
    }

    /// Appends the canonical byte encoding of the set to `out`.
    ///
    /// Layout: entry count, then per entry the length-prefixed key bytes
    /// followed by a kind tag and the value payload. The encoding is a pure
    /// function of the contents.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.entries.len() as u64).to_le_bytes());
        for (key, value) in &self.entries {
            out.extend_from_slice(&(key.len() as u64).to_le_bytes());
            out.extend_from_slice(key.as_bytes());
            out.push(value.kind_tag());
            match value {
                AttrValue::Bool(b) => out.push(*b as u8),
                AttrValue::Int(i) => out.extend_from_slice(&i.to_le_bytes()),
                AttrValue::Float(f) => out.extend_from_slice(&f.to_bits().to_le_bytes()),
                AttrValue::Str(s) => {
                    out.extend_from_slice(&(s.len() as u64).to_le_bytes());
                    out.extend_from_slice(s.as_bytes());
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttrSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = AttrSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttrSet {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
