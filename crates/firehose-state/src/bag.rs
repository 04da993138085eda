//! Flattened attribute storage
//!
//! [`AttributeBag`] is the string-keyed representation persisted for a
//! resource; [`InstanceState`] pairs it with an identifier and the schema
//! version it was written at.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::AttributePath;
use crate::pattern::KeyPattern;

/// Flat mapping of dotted attribute keys to string values
///
/// Backed by an ordered map so that iteration, debug output and serialized
/// documents are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag {
    attributes: BTreeMap<String, String>,
}

impl AttributeBag {
    /// Create empty bag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if bag holds no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get value by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get value by key, treating an empty string as absent
    #[inline]
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Check if key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Set value, returning the previous one
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Set value at a typed path
    #[inline]
    pub fn insert_path(&mut self, path: &AttributePath, value: impl Into<String>) -> Option<String> {
        self.insert(path.to_string(), value)
    }

    /// Remove key, returning its value
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Snapshot of keys lying at or below a namespace
    ///
    /// The result is owned so the bag can be mutated while walking it.
    #[must_use]
    pub fn keys_under(&self, namespace: &AttributePath) -> Vec<String> {
        self.attributes
            .keys()
            .filter(|key| namespace.covers_key(key))
            .cloned()
            .collect()
    }

    /// Snapshot of keys matching a pattern
    #[must_use]
    pub fn keys_matching(&self, pattern: &KeyPattern) -> Vec<String> {
        self.attributes
            .keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect()
    }

    /// Iterate over `(key, value)` pairs in key order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate over keys in order
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for AttributeBag {
    fn from(attributes: BTreeMap<String, String>) -> Self {
        Self { attributes }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeBag {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Persisted record of one resource instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Resource identifier
    pub id: String,

    /// Schema version the attributes were written at
    #[serde(default)]
    pub schema_version: i64,

    /// Flattened attributes
    #[serde(default)]
    pub attributes: AttributeBag,
}

impl InstanceState {
    /// Create state at a given schema version
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, schema_version: i64, attributes: AttributeBag) -> Self {
        Self {
            id: id.into(),
            schema_version,
            attributes,
        }
    }

    /// Check if the state carries no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
