//! Best-match resolution of a query against stored keys.
//!
//! A stored key *matches* a query when all of its constraints appear in the
//! query. Among matches the key with the most constraints wins. Ties between
//! equally specific keys go to the lexicographically smallest key, so the
//! outcome never depends on the order entries were inserted in.

use crate::types::ConfigKey;

/// Find the most specific key in `keys` that is included in `query`.
///
/// Runs in `O(E * k)` for `E` keys of at most `k` constraints.
pub fn resolve<'a, I>(keys: I, query: &ConfigKey) -> Option<&'a ConfigKey>
where
    I: IntoIterator<Item = &'a ConfigKey>,
{
    let mut best: Option<&'a ConfigKey> = None;

    for candidate in keys {
        if !candidate.is_subset_of(query) {
            continue;
        }
        best = match best {
            None => Some(candidate),
            Some(current) if outranks(candidate, current) => Some(candidate),
            keep => keep,
        };
    }

    match best {
        Some(key) => tracing::debug!(query = %query, matched = %key, "Resolved configuration"),
        None => tracing::debug!(query = %query, "No configuration matches query"),
    }

    best
}

/// True if `candidate` should replace `current` as the best match.
fn outranks(candidate: &ConfigKey, current: &ConfigKey) -> bool {
    match candidate.len().cmp(&current.len()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => candidate < current,
    }
}
