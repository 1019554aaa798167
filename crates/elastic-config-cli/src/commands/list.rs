//! `list` command.

use std::io::Write;

use anyhow::Result;

use elastic_config::ElasticStore;

/// Print each stored configuration with the shape and size of its value.
pub fn execute(store: &ElasticStore<String>, out: &mut impl Write) -> Result<()> {
    for key in store.configurations() {
        if let Some(value) = store.get_exact(key) {
            writeln!(out, "{key}\t{}\t{}", value.shape(), value.len())?;
        }
    }
    Ok(())
}
