//! Version ordering for published rules.
//!
//! Rule versions are dot-separated strings such as `"1.2.0"`. Components are
//! compared numerically when both sides are integers and as raw strings
//! otherwise, so non-numeric components never cause a failure.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Compare two dot-separated version strings.
///
/// Components are compared pairwise up to the length of the shorter version.
/// When every shared component is equal, the version with more components is
/// greater, so `"1.2"` orders before `"1.2.1"`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use certrule_model::compare_versions;
///
/// assert_eq!(compare_versions("1.9", "1.10"), Ordering::Less);
/// assert_eq!(compare_versions("1.2.1", "1.2"), Ordering::Greater);
/// assert_eq!(compare_versions("1.a", "1.b"), Ordering::Less);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();

    for (l, r) in left.iter().zip(right.iter()) {
        match compare_component(l, r) {
            Ordering::Equal => {}
            other => return other,
        }
    }

    left.len().cmp(&right.len())
}

fn compare_component(a: &str, b: &str) -> Ordering {
    match (parse_component(a), parse_component(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn parse_component(s: &str) -> Option<i64> {
    s.parse().ok()
}

/// A rule version string with a total order.
///
/// The order agrees with [`compare_versions`] except where a numeric component
/// meets a non-numeric one, in which case the numeric component sorts first.
/// Unlike [`compare_versions`] it is transitive over every input. Rule selection
/// uses [`compare_versions`] directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleVersion(String);

impl RuleVersion {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleVersion {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort key for one component under the total order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Component<'a> {
    Number(i64),
    Text(&'a str),
}

impl<'a> Component<'a> {
    fn of(s: &'a str) -> Self {
        match parse_component(s) {
            Some(n) => Self::Number(n),
            None => Self::Text(s),
        }
    }
}

// Equality follows the ordering so "1.01" == "1.1".
impl PartialEq for RuleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RuleVersion {}

impl PartialOrd for RuleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .split('.')
            .map(Component::of)
            .cmp(other.0.split('.').map(Component::of))
    }
}
