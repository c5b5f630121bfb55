//! Data model for certificate validation rules.
//!
//! # Module Organization
//!
//! - [`category`]: Certificate categories and rule types
//! - [`rule`]: The [`ValidationRule`] record and its validity checks
//! - [`version`]: Dotted version ordering used to pick the newest rule
//! - [`error`]: Error type for rule construction and conversion

pub mod category;
pub mod error;
pub mod rule;
pub mod version;

pub use category::{CertificateCategory, RuleType, category_matches};
pub use error::{Result, RuleError};
pub use rule::{RuleDescription, ValidationRule};
pub use version::{RuleVersion, compare_versions};
