//! Certificate categories and rule types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Certificate category a rule applies to.
///
/// `General` is a wildcard: a general rule applies to every certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateCategory {
    General,
    Test,
    Vaccination,
    Recovery,
}

impl CertificateCategory {
    /// Get all categories.
    pub const fn all() -> &'static [Self] {
        &[
            Self::General,
            Self::Test,
            Self::Vaccination,
            Self::Recovery,
        ]
    }

    /// Parse a category name, ignoring case.
    ///
    /// Returns `None` for anything outside the fixed enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
    }

    /// Canonical name as published in rule sets.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Test => "Test",
            Self::Vaccination => "Vaccination",
            Self::Recovery => "Recovery",
        }
    }

    /// Description for listings.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::General => "Applies to every certificate category",
            Self::Test => "Test certificates",
            Self::Vaccination => "Vaccination certificates",
            Self::Recovery => "Recovery certificates",
        }
    }
}

/// Check whether a rule published for `rule_category` applies to a certificate
/// of the `requested` category. Both sides compare ignoring case.
pub fn category_matches(rule_category: &str, requested: &str) -> bool {
    rule_category.eq_ignore_ascii_case(CertificateCategory::General.as_str())
        || rule_category.eq_ignore_ascii_case(requested)
}

impl fmt::Display for CertificateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rule accepts certificates or invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleType {
    #[default]
    Acceptance,
    Invalidation,
}

impl RuleType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Acceptance => "Acceptance",
            Self::Invalidation => "Invalidation",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acceptance" => Ok(Self::Acceptance),
            "invalidation" => Ok(Self::Invalidation),
            _ => Err(RuleError::UnknownRuleType(s.to_string())),
        }
    }
}
