//! Rule selection: category filter, validity filter, newest version per rule.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use certrule_model::{RuleType, ValidationRule, compare_versions};

/// Select the rules that apply to a certificate of `category` at `now`.
///
/// A rule survives when its category is `General` or equals `category`
/// (ignoring case), when `now` is inside its inclusive validity window, and
/// when no other surviving rule with the same identifier has a higher version.
/// Result order follows the first appearance of each identifier in `rules`.
pub fn select_applicable_rules(
    rules: &[ValidationRule],
    now: DateTime<Utc>,
    category: &str,
) -> Vec<ValidationRule> {
    RuleQuery::new(now, category).select(rules)
}

/// Keep only the highest version of each identifier.
///
/// When two versions compare equal the one seen first is kept.
pub fn select_highest_versions<'a, I>(rules: I) -> Vec<ValidationRule>
where
    I: IntoIterator<Item = &'a ValidationRule>,
{
    let mut best: Vec<&ValidationRule> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for rule in rules {
        match slots.get(rule.identifier.as_str()) {
            Some(&slot) => {
                if compare_versions(&rule.version, &best[slot].version) == Ordering::Greater {
                    best[slot] = rule;
                }
            }
            None => {
                slots.insert(rule.identifier.as_str(), best.len());
                best.push(rule);
            }
        }
    }

    best.into_iter().cloned().collect()
}

/// Selection parameters with optional pre-filters.
///
/// Without pre-filters, [`RuleQuery::select`] behaves exactly like
/// [`select_applicable_rules`].
#[derive(Debug, Clone)]
pub struct RuleQuery {
    now: DateTime<Utc>,
    category: String,
    rule_type: Option<RuleType>,
    country: Option<String>,
}

impl RuleQuery {
    pub fn new(now: DateTime<Utc>, category: impl Into<String>) -> Self {
        Self {
            now,
            category: category.into(),
            rule_type: None,
            country: None,
        }
    }

    /// Only consider rules of this type.
    #[must_use]
    pub fn with_rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = Some(rule_type);
        self
    }

    /// Only consider rules published for this country (ignoring case).
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    fn passes_pre_filters(&self, rule: &ValidationRule) -> bool {
        if let Some(rule_type) = self.rule_type
            && rule.rule_type != rule_type
        {
            return false;
        }
        if let Some(country) = &self.country
            && !rule.country.eq_ignore_ascii_case(country)
        {
            return false;
        }
        true
    }

    /// Run the selection over `rules`.
    pub fn select(&self, rules: &[ValidationRule]) -> Vec<ValidationRule> {
        let survivors = rules.iter().filter(|rule| {
            self.passes_pre_filters(rule)
                && rule.applies_to(&self.category)
                && rule.is_valid_at(self.now)
        });
        let selected = select_highest_versions(survivors);

        tracing::debug!(
            input = rules.len(),
            selected = selected.len(),
            "selected applicable rules"
        );
        selected
    }
}
