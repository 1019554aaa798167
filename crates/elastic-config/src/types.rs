//! Core type definitions for specificity-resolved storage.

use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// A set of attribute constraints, as supplied by a caller.
///
/// Pairs keep the order they were inserted in. Inserting an attribute that is
/// already present replaces its value, so a configuration never carries two
/// constraints on the same attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pairs: IndexMap<String, String>,
}

impl Configuration {
    /// Create an empty configuration (satisfied by every query).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint, replacing any previous value for `attribute`.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Add a constraint in place. Returns the value it replaced, if any.
    pub fn insert(
        &mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.pairs.insert(attribute.into(), value.into())
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the constraints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn into_pairs(self) -> IndexMap<String, String> {
        self.pairs
    }
}

impl<K, V> FromIterator<(K, V)> for Configuration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Configuration::new();
        for (attribute, value) in iter {
            config.insert(attribute, value);
        }
        config
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Configuration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Configuration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<&Configuration> for Configuration {
    fn from(config: &Configuration) -> Self {
        config.clone()
    }
}

impl From<&ConfigKey> for Configuration {
    fn from(key: &ConfigKey) -> Self {
        key.iter().collect()
    }
}

/// Canonical form of a [`Configuration`].
///
/// Pairs are sorted by attribute name and attribute names are unique, so two
/// configurations with the same constraints always produce equal keys. The
/// derived ordering compares pair by pair (attribute, then value).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey {
    pub(crate) pairs: Vec<(String, String)>,
}

impl ConfigKey {
    /// The empty key. It is included in every other key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of constraints; this is the key's specificity.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the constraints in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value constrained for `attribute`, if any.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.pairs
            .binary_search_by(|(k, _)| k.as_str().cmp(attribute))
            .ok()
            .map(|i| self.pairs[i].1.as_str())
    }

    /// True if every constraint of `self` also appears in `other`.
    ///
    /// Both keys are sorted by attribute, so this is a single merge walk.
    pub fn is_subset_of(&self, other: &ConfigKey) -> bool {
        if self.pairs.len() > other.pairs.len() {
            return false;
        }
        let mut theirs = other.pairs.iter();
        'outer: for (attribute, value) in &self.pairs {
            for (their_attribute, their_value) in theirs.by_ref() {
                match their_attribute.cmp(attribute) {
                    std::cmp::Ordering::Less => continue,
                    std::cmp::Ordering::Equal if their_value == value => continue 'outer,
                    _ => return false,
                }
            }
            return false;
        }
        true
    }

    /// True if every constraint of `other` also appears in `self`.
    pub fn is_superset_of(&self, other: &ConfigKey) -> bool {
        other.is_subset_of(self)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (attribute, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attribute}={value}")?;
        }
        f.write_str("}")
    }
}

/// The value held by one entry of an [`ElasticStore`](crate::ElasticStore).
///
/// The shape of an entry follows the last mutator applied to it: `set`
/// always leaves a [`StoredValue::Single`], `append` leaves a
/// [`StoredValue::List`] and `add` leaves a [`StoredValue::Set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue<V: Hash + Eq> {
    /// Exactly one value.
    Single(V),

    /// Ordered values; duplicates allowed.
    List(Vec<V>),

    /// Distinct values. Iteration follows first insertion.
    Set(IndexSet<V>),
}

impl<V: Hash + Eq> StoredValue<V> {
    /// Number of values held (a `Single` holds one).
    pub fn len(&self) -> usize {
        match self {
            StoredValue::Single(_) => 1,
            StoredValue::List(items) => items.len(),
            StoredValue::Set(items) => items.len(),
        }
    }

    /// True only for an empty list or set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the held values, flattening containers.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        match self {
            StoredValue::Single(value) => Box::new(std::iter::once(value)),
            StoredValue::List(items) => Box::new(items.iter()),
            StoredValue::Set(items) => Box::new(items.iter()),
        }
    }

    pub fn as_single(&self) -> Option<&V> {
        match self {
            StoredValue::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[V]> {
        match self {
            StoredValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<V>> {
        match self {
            StoredValue::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value's shape, for reports and logs.
    pub fn shape(&self) -> &'static str {
        match self {
            StoredValue::Single(_) => "single",
            StoredValue::List(_) => "list",
            StoredValue::Set(_) => "set",
        }
    }

    /// Consume the value, yielding its members in iteration order.
    pub(crate) fn into_members(self) -> Vec<V> {
        match self {
            StoredValue::Single(value) => vec![value],
            StoredValue::List(items) => items,
            StoredValue::Set(items) => items.into_iter().collect(),
        }
    }
}

/// Errors raised by store lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No stored configuration is included in the query.
    #[error("{query} does not match an existing configuration")]
    NotFound {
        /// The canonicalized query
        query: ConfigKey,
    },
}
