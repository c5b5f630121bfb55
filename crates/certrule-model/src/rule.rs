//! The validation rule record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{CertificateCategory, RuleType, category_matches};
use crate::error::{Result, RuleError};

/// Localised rule description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescription {
    pub lang: String,
    pub desc: String,
}

/// One published version of a certificate validation rule.
///
/// Only `identifier`, `category`, `version` and the validity window take part
/// in rule selection. The remaining fields are carried through untouched for
/// the verification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Groups all versions of the same logical rule.
    pub identifier: String,
    #[serde(default)]
    pub rule_type: RuleType,
    /// Raw certificate category; see [`CertificateCategory`].
    pub category: String,
    pub version: String,
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub engine_version: String,
    /// Start of the validity window (inclusive).
    pub valid_from: DateTime<Utc>,
    /// End of the validity window (inclusive).
    pub valid_to: DateTime<Utc>,
    #[serde(default)]
    pub descriptions: Vec<RuleDescription>,
    #[serde(default)]
    pub affected_fields: Vec<String>,
    /// Engine logic payload, never interpreted here.
    #[serde(default)]
    pub logic: serde_json::Value,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ValidationRule {
    /// Create a rule with the selection fields set and empty pass-through data.
    pub fn new(
        identifier: impl Into<String>,
        category: impl Into<String>,
        version: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            rule_type: RuleType::default(),
            category: category.into(),
            version: version.into(),
            schema_version: String::new(),
            engine: String::new(),
            engine_version: String::new(),
            valid_from,
            valid_to,
            descriptions: Vec::new(),
            affected_fields: Vec::new(),
            logic: serde_json::Value::Null,
            country: String::new(),
            region: None,
        }
    }

    /// Typed category, or `None` when the published value is unknown.
    pub fn certificate_category(&self) -> Option<CertificateCategory> {
        CertificateCategory::parse(&self.category)
    }

    /// Whether this rule applies to certificates of `category`.
    pub fn applies_to(&self, category: &str) -> bool {
        category_matches(&self.category, category)
    }

    /// Whether `now` lies inside the inclusive validity window.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && now <= self.valid_to
    }

    /// Description for `lang`, falling back to the first one published.
    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|d| d.lang.eq_ignore_ascii_case(lang))
            .or_else(|| self.descriptions.first())
            .map(|d| d.desc.as_str())
    }

    /// Check that the rule is well formed.
    ///
    /// Selection never calls this; malformed rules still take part and simply
    /// fail the filters they cannot pass.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(RuleError::MissingIdentifier);
        }
        if self.version.trim().is_empty() {
            return Err(RuleError::MissingVersion {
                identifier: self.identifier.clone(),
            });
        }
        if self.valid_from > self.valid_to {
            return Err(RuleError::InvertedWindow {
                identifier: self.identifier.clone(),
                version: self.version.clone(),
            });
        }
        Ok(())
    }
}
