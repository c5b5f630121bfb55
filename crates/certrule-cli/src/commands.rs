use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn};

use certrule_model::{CertificateCategory, RuleType, ValidationRule};
use certrule_select::{RuleQuery, load_rules};

use crate::settings::{SelectionSettings, Settings};

/// Inputs for a selection run; unset fields fall back to settings.
#[derive(Debug, Clone, Default)]
pub struct SelectRequest {
    pub rules_path: Option<PathBuf>,
    pub category: Option<String>,
    /// RFC 3339 instant; the current time when unset.
    pub at: Option<String>,
    pub rule_type: Option<RuleType>,
    pub country: Option<String>,
}

/// Result of a selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    pub rules_path: PathBuf,
    pub category: String,
    pub now: DateTime<Utc>,
    /// Number of rules in the loaded rule set.
    pub total: usize,
    pub rules: Vec<ValidationRule>,
}

pub fn run_select(request: &SelectRequest, settings: &SelectionSettings) -> Result<Selection> {
    let rules_path = request
        .rules_path
        .clone()
        .or_else(|| settings.rules_path.clone())
        .ok_or_else(|| anyhow!("no rule set given; pass --rules or set selection.rules_path"))?;
    let category = request
        .category
        .clone()
        .unwrap_or_else(|| settings.default_category.clone());
    let now = match &request.at {
        Some(value) => parse_instant(value)?,
        None => Utc::now(),
    };

    let span = info_span!("select", category = %category);
    let _guard = span.enter();

    if CertificateCategory::parse(&category).is_none() {
        warn!("category is outside the published enumeration");
    }

    let rules = load_rules(&rules_path)
        .with_context(|| format!("load rule set {}", rules_path.display()))?;

    let mut query = RuleQuery::new(now, category.as_str());
    if let Some(rule_type) = request.rule_type {
        query = query.with_rule_type(rule_type);
    }
    if let Some(country) = &request.country {
        query = query.with_country(country.as_str());
    }
    let selected = query.select(&rules);
    info!(
        total = rules.len(),
        selected = selected.len(),
        "rule selection complete"
    );

    Ok(Selection {
        rules_path,
        category,
        now,
        total: rules.len(),
        rules: selected,
    })
}

/// Parse an RFC 3339 instant into UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .with_context(|| format!("invalid RFC 3339 timestamp: {value}"))
}

/// Write default settings to `path`, refusing to overwrite unless `force`.
pub fn run_settings_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "settings file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Settings::default().save_to(path)?;
    info!(path = %path.display(), "wrote default settings");
    Ok(())
}
