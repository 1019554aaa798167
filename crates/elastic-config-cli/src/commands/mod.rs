//! Command implementations for the elasconf CLI
//!
//! Each command module handles the CLI interface and delegates to
//! elastic-config for the actual lookups.

pub mod aggregate;
pub mod list;
pub mod query;

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use elastic_config::{Configuration, ElasticStore, load_rules};

/// Read and apply the rule document at `path`.
pub fn load_store(path: &Path) -> Result<ElasticStore<String>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule document {}", path.display()))?;
    let store = load_rules(&source)
        .with_context(|| format!("Failed to load rule document {}", path.display()))?;
    debug!(path = %path.display(), configurations = store.len(), "Loaded rules");
    Ok(store)
}

/// Parse `ATTR=VALUE` arguments into a configuration.
///
/// The value may itself contain `=`; only the first one separates.
pub fn parse_pairs(pairs: &[String]) -> Result<Configuration> {
    let mut config = Configuration::new();
    for pair in pairs {
        let Some((attribute, value)) = pair.split_once('=') else {
            bail!("Expected ATTR=VALUE, got `{pair}`");
        };
        let attribute = attribute.trim();
        if attribute.is_empty() {
            bail!("Missing attribute name in `{pair}`");
        }
        if config.insert(attribute, value).is_some() {
            bail!("Attribute `{attribute}` given more than once");
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_pairs() {
        let config = parse_pairs(&args(&["lang=en", "sector=construction"])).unwrap();
        assert_eq!(
            config.iter().collect::<Vec<_>>(),
            vec![("lang", "en"), ("sector", "construction")]
        );
    }

    #[test]
    fn test_parse_pairs_value_may_contain_equals() {
        let config = parse_pairs(&args(&["expr=a=b"])).unwrap();
        assert_eq!(config.iter().collect::<Vec<_>>(), vec![("expr", "a=b")]);
    }

    #[test]
    fn test_parse_pairs_empty() {
        assert!(parse_pairs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_pairs_rejects_malformed() {
        assert!(parse_pairs(&args(&["lang"])).is_err());
        assert!(parse_pairs(&args(&["=en"])).is_err());
        assert!(parse_pairs(&args(&["lang=en", "lang=es"])).is_err());
    }

    #[test]
    fn test_load_store_missing_file() {
        let err = load_store(Path::new("/nonexistent/rules.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read rule document"));
    }
}
