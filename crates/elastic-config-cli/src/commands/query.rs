//! `get` and `contains` commands.

use std::io::Write;

use anyhow::Result;

use elastic_config::ElasticStore;

use super::parse_pairs;

/// Print the resolved value, one member per line.
pub fn get(
    store: &ElasticStore<String>,
    pairs: &[String],
    explain: bool,
    out: &mut impl Write,
) -> Result<()> {
    let query = parse_pairs(pairs)?;
    let value = store.get(&query)?;

    if explain {
        if let Some(matched) = store.resolve_key(&query) {
            writeln!(out, "# matched {matched} ({})", value.shape())?;
        }
    }
    for item in value.iter() {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

/// Print `true` or `false`.
pub fn contains(
    store: &ElasticStore<String>,
    pairs: &[String],
    exact: bool,
    out: &mut impl Write,
) -> Result<()> {
    let query = parse_pairs(pairs)?;
    let found = if exact {
        store.has_exact(&query)
    } else {
        store.elastic_contains(&query)
    };
    writeln!(out, "{found}")?;
    Ok(())
}
