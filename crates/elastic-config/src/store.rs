//! The specificity-resolving store.
//!
//! [`ElasticStore`] keeps at most one entry per canonical [`ConfigKey`].
//! Lookups through [`ElasticStore::get`] fall back to the most specific stored
//! configuration whose constraints are all satisfied by the query.
//!
//! # Value shapes
//!
//! Every entry holds a [`StoredValue`]. The mutators define how the shape
//! evolves:
//!
//! - [`ElasticStore::set`] replaces the entry with a `Single`, whatever it held.
//! - [`ElasticStore::append`] leaves a `List`. A `Single` is promoted to a
//!   list holding the prior value first; a `Set` is promoted to a list of its
//!   members in set order.
//! - [`ElasticStore::add`] leaves a `Set`. A `Single` or `List` is promoted to
//!   a set of its members.
//!
//! # Example
//!
//! ```rust
//! use elastic_config::{ElasticStore, StoredValue};
//!
//! let mut store = ElasticStore::new();
//! store.set([("lang", "en")], "en");
//! store.set([("lang", "en"), ("sector", "construction")], "en-construction");
//!
//! // No entry for retail, so the `lang=en` entry answers.
//! let value = store.get([("lang", "en"), ("sector", "retail")]).unwrap();
//! assert_eq!(value, &StoredValue::Single("en"));
//! ```

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::key::canonicalize;
use crate::resolve::resolve;
use crate::types::{ConfigKey, Configuration, StoreError, StoredValue};

/// Values stored under configurations and resolved by specificity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticStore<V: Hash + Eq> {
    /// Entries in first-insertion order of their keys.
    pub(crate) entries: IndexMap<ConfigKey, StoredValue<V>>,
}

impl<V: Hash + Eq> Default for ElasticStore<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V: Hash + Eq> ElasticStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored configurations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The stored configurations, in the order they were first written.
    pub fn configurations(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.keys()
    }

    /// Store `value` under `config`, replacing whatever was there.
    pub fn set(&mut self, config: impl Into<Configuration>, value: V) {
        let key = canonicalize(config);
        tracing::trace!(key = %key, "Setting value");
        self.entries.insert(key, StoredValue::Single(value));
    }

    /// The stored configuration that `config` resolves to, if any.
    pub fn resolve_key(&self, config: impl Into<Configuration>) -> Option<&ConfigKey> {
        let query = canonicalize(config);
        resolve(self.entries.keys(), &query)
    }

    /// Retrieve the value of the most specific stored configuration that is
    /// included in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no stored configuration is
    /// included in `config`.
    pub fn get(&self, config: impl Into<Configuration>) -> Result<&StoredValue<V>, StoreError> {
        let query = canonicalize(config);
        resolve(self.entries.keys(), &query)
            .and_then(|key| self.entries.get(key))
            .ok_or(StoreError::NotFound { query })
    }

    /// Retrieve the value stored under exactly `config`, without falling back.
    pub fn get_exact(&self, config: impl Into<Configuration>) -> Option<&StoredValue<V>> {
        self.entries.get(&canonicalize(config))
    }

    /// True if some stored configuration is included in `config`.
    ///
    /// This is the check `get` succeeds on, and is looser than
    /// [`ElasticStore::has_exact`].
    pub fn elastic_contains(&self, config: impl Into<Configuration>) -> bool {
        self.resolve_key(config).is_some()
    }

    /// True if `config` itself is a stored configuration.
    pub fn has_exact(&self, config: impl Into<Configuration>) -> bool {
        self.entries.contains_key(&canonicalize(config))
    }

    /// Remove the entry stored under exactly `config`.
    ///
    /// The remaining entries keep their relative order.
    pub fn remove(&mut self, config: impl Into<Configuration>) -> Option<StoredValue<V>> {
        self.entries.shift_remove(&canonicalize(config))
    }

    /// Append `value` to the list stored under `config`.
    ///
    /// Creates a one-element list when nothing is stored. A non-list value is
    /// promoted to a list first (see the module docs). Returns the resulting
    /// list.
    pub fn append(&mut self, config: impl Into<Configuration>, value: V) -> &[V] {
        let key = canonicalize(config);
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| StoredValue::List(Vec::new()));
        let items = slot.promote_to_list();
        items.push(value);
        items
    }

    /// Add `value` to the set stored under `config`.
    ///
    /// Creates a one-element set when nothing is stored. Adding a value that
    /// is already a member leaves the set unchanged. A non-set value is
    /// promoted to a set first (see the module docs). Returns the resulting
    /// set.
    pub fn add(&mut self, config: impl Into<Configuration>, value: V) -> &IndexSet<V> {
        let key = canonicalize(config);
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| StoredValue::Set(IndexSet::new()));
        let items = slot.promote_to_set();
        items.insert(value);
        items
    }
}

impl<V: Hash + Eq> StoredValue<V> {
    fn promote_to_list(&mut self) -> &mut Vec<V> {
        match self {
            StoredValue::List(items) => items,
            _ => {
                let prior = std::mem::replace(self, StoredValue::List(Vec::new()));
                tracing::debug!(from = prior.shape(), "Promoting stored value to list");
                *self = StoredValue::List(prior.into_members());
                self.promote_to_list()
            }
        }
    }

    fn promote_to_set(&mut self) -> &mut IndexSet<V> {
        match self {
            StoredValue::Set(items) => items,
            _ => {
                let prior = std::mem::replace(self, StoredValue::Set(IndexSet::new()));
                tracing::debug!(from = prior.shape(), "Promoting stored value to set");
                *self = StoredValue::Set(prior.into_members().into_iter().collect());
                self.promote_to_set()
            }
        }
    }
}

impl<C, V> FromIterator<(C, V)> for ElasticStore<V>
where
    C: Into<Configuration>,
    V: Hash + Eq,
{
    /// Build a store by calling [`ElasticStore::set`] for each pair in order.
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut store = ElasticStore::new();
        store.extend(iter);
        store
    }
}

impl<C, V> Extend<(C, V)> for ElasticStore<V>
where
    C: Into<Configuration>,
    V: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (C, V)>>(&mut self, iter: I) {
        for (config, value) in iter {
            self.set(config, value);
        }
    }
}
