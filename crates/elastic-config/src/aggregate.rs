//! Aggregation over every entry compatible with a query.
//!
//! Where [`ElasticStore::get`] looks *down* from a query to the single most
//! specific stored configuration included in it, aggregation looks *up*: it
//! collects the values of every stored configuration that includes the query.
//! An empty query therefore collects the whole store.
//!
//! Entries contribute in store order (first insertion of their key). That
//! order is an implementation detail and callers should not depend on it
//! across entries; within a list entry, element order is preserved.

use std::hash::Hash;

use indexmap::IndexSet;

use crate::key::canonicalize;
use crate::store::ElasticStore;
use crate::types::{Configuration, StoredValue};

impl<V: Hash + Eq> ElasticStore<V> {
    /// Every value stored under a configuration that includes `config`,
    /// flattening lists and sets. Duplicates are kept.
    pub fn all(&self, config: impl Into<Configuration>) -> Vec<&V> {
        let values: Vec<&V> = self
            .entries_including(config)
            .flat_map(StoredValue::iter)
            .collect();
        tracing::trace!(count = values.len(), "Collected values");
        values
    }

    /// Like [`ElasticStore::all`], with duplicate values removed.
    pub fn bag(&self, config: impl Into<Configuration>) -> IndexSet<&V> {
        let values: IndexSet<&V> = self
            .entries_including(config)
            .flat_map(StoredValue::iter)
            .collect();
        tracing::trace!(count = values.len(), "Collected distinct values");
        values
    }

    fn entries_including(
        &self,
        config: impl Into<Configuration>,
    ) -> impl Iterator<Item = &StoredValue<V>> {
        let query = canonicalize(config);
        self.entries
            .iter()
            .filter(move |(key, _)| key.is_superset_of(&query))
            .map(|(_, value)| value)
    }
}
