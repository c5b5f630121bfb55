//! JSON rule-set loader.
//!
//! Rule sets are JSON arrays of rules in engine layout (see [`EngineRule`]).

use std::path::{Path, PathBuf};

use thiserror::Error;

use certrule_model::{RuleError, ValidationRule};

use crate::engine::EngineRule;

/// Error loading a rule set.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Rule file does not exist.
    #[error("rules file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Rule file could not be read.
    #[error("failed to read rules from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not a JSON array of engine rules.
    #[error("failed to parse rules from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A rule could not be converted into the internal model.
    #[error("rule #{index} in {} is invalid", path.display())]
    Rule {
        path: PathBuf,
        index: usize,
        #[source]
        source: RuleError,
    },
}

/// Load a rule set from a JSON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, not valid JSON, or
/// contains a rule with an unknown type.
pub fn load_rules(path: &Path) -> Result<Vec<ValidationRule>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rules = parse_rules(&content, path)?;
    tracing::info!(path = %path.display(), count = rules.len(), "loaded rule set");
    Ok(rules)
}

/// Parse a rule set from JSON text. `origin` is only used in errors and logs.
///
/// Malformed rules (see [`ValidationRule::validate`]) are logged and kept.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of engine rules or a rule
/// has an unknown type.
pub fn parse_rules(content: &str, origin: &Path) -> Result<Vec<ValidationRule>, LoadError> {
    let raw: Vec<EngineRule> =
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

    let mut rules = Vec::with_capacity(raw.len());
    for (index, engine_rule) in raw.into_iter().enumerate() {
        let rule = ValidationRule::try_from(engine_rule).map_err(|source| LoadError::Rule {
            path: origin.to_path_buf(),
            index,
            source,
        })?;
        if let Err(problem) = rule.validate() {
            tracing::warn!(index, identifier = %rule.identifier, "{problem}");
        }
        rules.push(rule);
    }
    Ok(rules)
}
