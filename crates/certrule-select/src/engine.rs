//! Mapping between [`ValidationRule`] and the verification engine's rule shape.
//!
//! The engine consumes rules in the published CertLogic JSON layout, which
//! uses PascalCase keys and a string rule type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certrule_model::{RuleDescription, RuleError, ValidationRule};

/// Localised description in engine layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDescription {
    pub lang: String,
    pub desc: String,
}

/// A rule as exchanged with the verification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EngineRule {
    pub identifier: String,
    #[serde(rename = "Type")]
    pub rule_type: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub version: String,
    pub schema_version: String,
    pub engine: String,
    pub engine_version: String,
    pub certificate_type: String,
    #[serde(rename = "Description", default)]
    pub descriptions: Vec<EngineDescription>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default)]
    pub affected_fields: Vec<String>,
    #[serde(default)]
    pub logic: serde_json::Value,
}

impl From<&ValidationRule> for EngineRule {
    fn from(rule: &ValidationRule) -> Self {
        Self {
            identifier: rule.identifier.clone(),
            rule_type: rule.rule_type.as_str().to_string(),
            country: rule.country.clone(),
            region: rule.region.clone(),
            version: rule.version.clone(),
            schema_version: rule.schema_version.clone(),
            engine: rule.engine.clone(),
            engine_version: rule.engine_version.clone(),
            certificate_type: rule.category.clone(),
            descriptions: rule
                .descriptions
                .iter()
                .map(|d| EngineDescription {
                    lang: d.lang.clone(),
                    desc: d.desc.clone(),
                })
                .collect(),
            valid_from: rule.valid_from,
            valid_to: rule.valid_to,
            affected_fields: rule.affected_fields.clone(),
            logic: rule.logic.clone(),
        }
    }
}

impl TryFrom<EngineRule> for ValidationRule {
    type Error = RuleError;

    fn try_from(rule: EngineRule) -> Result<Self, Self::Error> {
        Ok(Self {
            rule_type: rule.rule_type.parse()?,
            identifier: rule.identifier,
            category: rule.certificate_type,
            version: rule.version,
            schema_version: rule.schema_version,
            engine: rule.engine,
            engine_version: rule.engine_version,
            valid_from: rule.valid_from,
            valid_to: rule.valid_to,
            descriptions: rule
                .descriptions
                .into_iter()
                .map(|d| RuleDescription {
                    lang: d.lang,
                    desc: d.desc,
                })
                .collect(),
            affected_fields: rule.affected_fields,
            logic: rule.logic,
            country: rule.country,
            region: rule.region,
        })
    }
}

/// Convert a selection result for hand-off to the engine.
pub fn to_engine_rules(rules: &[ValidationRule]) -> Vec<EngineRule> {
    rules.iter().map(EngineRule::from).collect()
}
