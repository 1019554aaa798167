//! Rule documents: layered defaults declared in YAML.
//!
//! A rule document is a YAML sequence. Each rule names the configuration it
//! applies to under `when` and exactly one action:
//!
//! ```yaml
//! - when: {lang: en}
//!   set: en
//! - when: {lang: en, sector: construction}
//!   append: [en-construction, en-construction-extra]
//! - when: {lang: es}
//!   add: es1
//! ```
//!
//! Rules are applied in document order through the store's mutators, so
//! later rules override or extend earlier ones exactly as the equivalent
//! sequence of calls would. A missing `when` means the empty configuration,
//! which every query falls back to.

use thiserror::Error;
use yaml_rust2::{Yaml, YamlLoader};

use crate::store::ElasticStore;
use crate::types::Configuration;

/// What a rule does to the entry for its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// `set:` a scalar.
    Set(String),

    /// `append:` a scalar or a non-empty sequence of scalars, appended in order.
    Append(Vec<String>),

    /// `add:` a scalar or a non-empty sequence of scalars, added in order.
    Add(Vec<String>),
}

/// One parsed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Configuration the rule writes to
    pub when: Configuration,

    /// Mutation to apply
    pub action: RuleAction,
}

impl Rule {
    /// Apply the rule to `store`.
    pub fn apply(self, store: &mut ElasticStore<String>) {
        match self.action {
            RuleAction::Set(value) => store.set(self.when, value),
            RuleAction::Append(values) => {
                for value in values {
                    store.append(&self.when, value);
                }
            }
            RuleAction::Add(values) => {
                for value in values {
                    store.add(&self.when, value);
                }
            }
        }
    }
}

/// Errors that can occur while reading a rule document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The document is not valid YAML.
    #[error("Invalid YAML: {message}")]
    Syntax {
        /// Parser message, including the location
        message: String,
    },

    /// The source holds more than one YAML document.
    #[error("Expected a single YAML document, found {count}")]
    MultipleDocuments {
        /// Number of documents found
        count: usize,
    },

    /// The document root is not a sequence of rules.
    #[error("Rule document must be a sequence of rules")]
    NotASequence,

    /// A rule is not a map.
    #[error("Rule {index}: expected a map with `when` and an action")]
    NotAMap {
        /// Position of the rule in the document
        index: usize,
    },

    /// A rule has a field other than `when`, `set`, `append` or `add`.
    #[error("Rule {index}: unknown field `{field}`")]
    UnknownField {
        /// Position of the rule in the document
        index: usize,
        /// The offending field name
        field: String,
    },

    /// `when` is not a map of scalar attributes to scalar values.
    #[error("Rule {index}: `when` must map attribute names to scalar values")]
    InvalidConfiguration {
        /// Position of the rule in the document
        index: usize,
    },

    /// A rule has no action.
    #[error("Rule {index}: expected one of `set`, `append` or `add`")]
    MissingAction {
        /// Position of the rule in the document
        index: usize,
    },

    /// A rule has more than one action.
    #[error("Rule {index}: only one of `set`, `append` or `add` may be given")]
    ConflictingActions {
        /// Position of the rule in the document
        index: usize,
    },

    /// An action value is not a scalar (or, for `append`/`add`, a non-empty
    /// sequence of scalars).
    #[error("Rule {index}: invalid value for `{field}`")]
    InvalidValue {
        /// Position of the rule in the document
        index: usize,
        /// The action whose value is invalid
        field: String,
    },
}

/// Parse a rule document without applying it.
///
/// An empty document yields no rules.
///
/// # Errors
///
/// Returns a [`RuleError`] describing the first problem found.
pub fn parse_rules(source: &str) -> Result<Vec<Rule>, RuleError> {
    let mut docs = YamlLoader::load_from_str(source).map_err(|e| RuleError::Syntax {
        message: e.to_string(),
    })?;

    // A trailing `---` leaves an empty document behind.
    while matches!(docs.last(), Some(Yaml::Null)) {
        docs.pop();
    }

    let root = match docs.len() {
        0 => return Ok(Vec::new()),
        1 => docs.remove(0),
        count => return Err(RuleError::MultipleDocuments { count }),
    };

    let items = match root {
        Yaml::Array(items) => items,
        Yaml::Null => return Ok(Vec::new()),
        _ => return Err(RuleError::NotASequence),
    };

    let rules = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_rule(index, item))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = rules.len(), "Parsed rule document");
    Ok(rules)
}

/// Parse a rule document and apply it to a fresh store.
///
/// # Errors
///
/// Returns a [`RuleError`] if the document is malformed. Nothing is applied
/// unless the whole document parses.
pub fn load_rules(source: &str) -> Result<ElasticStore<String>, RuleError> {
    let mut store = ElasticStore::new();
    for rule in parse_rules(source)? {
        rule.apply(&mut store);
    }
    Ok(store)
}

fn parse_rule(index: usize, item: &Yaml) -> Result<Rule, RuleError> {
    let Yaml::Hash(fields) = item else {
        return Err(RuleError::NotAMap { index });
    };

    let mut when = Configuration::new();
    let mut action = None;

    for (field, value) in fields {
        let name = field.as_str().unwrap_or_default();
        let parsed = match name {
            "when" => {
                when = parse_configuration(index, value)?;
                continue;
            }
            "set" => RuleAction::Set(scalar_string(value).ok_or_else(|| {
                RuleError::InvalidValue {
                    index,
                    field: name.to_string(),
                }
            })?),
            "append" => RuleAction::Append(scalar_list(index, name, value)?),
            "add" => RuleAction::Add(scalar_list(index, name, value)?),
            _ => {
                return Err(RuleError::UnknownField {
                    index,
                    field: scalar_string(field).unwrap_or_else(|| format!("{field:?}")),
                });
            }
        };
        if action.replace(parsed).is_some() {
            return Err(RuleError::ConflictingActions { index });
        }
    }

    let action = action.ok_or(RuleError::MissingAction { index })?;
    Ok(Rule { when, action })
}

fn parse_configuration(index: usize, value: &Yaml) -> Result<Configuration, RuleError> {
    match value {
        Yaml::Null => Ok(Configuration::new()),
        Yaml::Hash(pairs) => pairs
            .iter()
            .map(|(attribute, value)| {
                match (scalar_string(attribute), scalar_string(value)) {
                    (Some(attribute), Some(value)) => Ok((attribute, value)),
                    _ => Err(RuleError::InvalidConfiguration { index }),
                }
            })
            .collect(),
        _ => Err(RuleError::InvalidConfiguration { index }),
    }
}

fn scalar_list(index: usize, field: &str, value: &Yaml) -> Result<Vec<String>, RuleError> {
    let invalid = || RuleError::InvalidValue {
        index,
        field: field.to_string(),
    };
    match value {
        Yaml::Array(items) if items.is_empty() => Err(invalid()),
        Yaml::Array(items) => items
            .iter()
            .map(|item| scalar_string(item).ok_or_else(invalid))
            .collect(),
        scalar => scalar_string(scalar).map(|s| vec![s]).ok_or_else(invalid),
    }
}

/// Render a YAML scalar as a string. Null and collections have no rendering.
fn scalar_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
