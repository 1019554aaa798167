//! Values resolved by configuration specificity.
//!
//! Values are stored under *configurations*: sets of attribute/value
//! constraints such as `lang=en, sector=construction`. A query is itself a
//! configuration, and resolves to the value stored under the most specific
//! stored configuration whose constraints the query satisfies. This makes
//! layered defaults cheap to express: rules for `lang=en` apply everywhere
//! English is requested, unless something more specific overrides them.
//!
//! # Key Features
//!
//! - **Order-independent keys**: configurations are canonicalized into a sorted [`ConfigKey`]
//! - **Elastic lookup**: [`ElasticStore::get`] falls back to the most specific match
//! - **Accumulation**: [`ElasticStore::append`] and [`ElasticStore::add`] grow lists and sets,
//!   promoting single values as needed
//! - **Aggregation**: [`ElasticStore::all`] and [`ElasticStore::bag`] collect every value at or
//!   below a configuration
//! - **Rule documents**: [`load_rules`] builds a store from YAML
//!
//! # Example
//!
//! ```rust
//! use elastic_config::{ElasticStore, StoredValue};
//!
//! let mut store = ElasticStore::new();
//! store.set([("lang", "es")], "es");
//! store.set([("lang", "en")], "en");
//! store.set([("lang", "en"), ("sector", "construction")], "en-construction");
//!
//! let value = store.get([("sector", "construction"), ("lang", "en")]).unwrap();
//! assert_eq!(value, &StoredValue::Single("en-construction"));
//!
//! // A query missing `lang` satisfies no stored configuration.
//! assert!(store.get([("sector", "retail")]).is_err());
//!
//! // Elastic containment falls back; exact containment does not.
//! assert!(store.elastic_contains([("lang", "en"), ("sector", "retail")]));
//! assert!(!store.has_exact([("lang", "en"), ("sector", "retail")]));
//! ```

mod aggregate;
mod key;
mod resolve;
mod rules;
mod store;
mod types;

pub use types::{
    ConfigKey,
    Configuration,
    StoreError,
    StoredValue,
};

pub use key::canonicalize;

pub use store::ElasticStore;

pub use rules::{
    Rule,
    RuleAction,
    RuleError,
    load_rules,
    parse_rules,
};

// Re-export for callers matching on set-valued entries
pub use indexmap::IndexSet;
