//! `all` and `bag` commands.

use std::io::Write;

use anyhow::Result;

use elastic_config::ElasticStore;

use super::parse_pairs;

pub fn all(store: &ElasticStore<String>, pairs: &[String], out: &mut impl Write) -> Result<()> {
    let query = parse_pairs(pairs)?;
    for value in store.all(&query) {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

pub fn bag(store: &ElasticStore<String>, pairs: &[String], out: &mut impl Write) -> Result<()> {
    let query = parse_pairs(pairs)?;
    for value in store.bag(&query) {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
