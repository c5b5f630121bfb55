//! Selection of the certificate validation rules that apply right now.
//!
//! # Usage
//!
//! ```ignore
//! let rules = load_rules(Path::new("rules.json"))?;
//! let applicable = select_applicable_rules(&rules, Utc::now(), "Vaccination");
//! let for_engine = to_engine_rules(&applicable);
//! ```

mod engine;
mod loader;
mod selector;

pub use engine::{EngineDescription, EngineRule, to_engine_rules};
pub use loader::{LoadError, load_rules, parse_rules};
pub use selector::{RuleQuery, select_applicable_rules, select_highest_versions};
