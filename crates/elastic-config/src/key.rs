//! Canonicalization of configurations into comparable keys.

use crate::types::{ConfigKey, Configuration};

/// Turn a configuration into its canonical key.
///
/// Pairs are sorted by attribute name. Attribute names are already unique
/// in a [`Configuration`], so the result never needs deduplication.
pub fn canonicalize(config: impl Into<Configuration>) -> ConfigKey {
    let mut pairs: Vec<(String, String)> = config.into().into_pairs().into_iter().collect();
    pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    ConfigKey { pairs }
}

impl From<Configuration> for ConfigKey {
    fn from(config: Configuration) -> Self {
        canonicalize(config)
    }
}

impl From<&Configuration> for ConfigKey {
    fn from(config: &Configuration) -> Self {
        canonicalize(config)
    }
}
