use thiserror::Error;

/// Errors raised when a rule is malformed or cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RuleError {
    /// Rule has no identifier.
    #[error("rule identifier must not be empty")]
    MissingIdentifier,

    /// Rule has no version string.
    #[error("rule {identifier} has an empty version")]
    MissingVersion { identifier: String },

    /// Validity window ends before it starts.
    #[error("rule {identifier} {version} has valid_from after valid_to")]
    InvertedWindow { identifier: String, version: String },

    /// Rule type string is neither acceptance nor invalidation.
    #[error("unknown rule type: {0}")]
    UnknownRuleType(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
