//! Rule composition errors (pipeline misuse by the caller).

use super::error_code::{self, ArchscopeErrorCode};

/// A rule could not be assembled into a runnable pipeline.
///
/// Always a programming or configuration error in the caller. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleCompositionError {
    #[error("Rule '{rule}' has no condition attached (expected `should` or `should_not`)")]
    MissingCondition { rule: String },

    #[error("Rule '{rule}' attaches more than one condition")]
    MultipleConditions { rule: String },

    #[error("Unknown custom rule: {0}")]
    UnknownCustomRule(String),

    #[error("Custom rule already registered: {0}")]
    DuplicateCustomRule(String),

    #[error("Invalid name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Rule definition is missing an id")]
    EmptyRuleId,

    #[error("Rule id '{0}' is declared more than once")]
    DuplicateRuleId(String),
}

impl ArchscopeErrorCode for RuleCompositionError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_COMPOSITION_ERROR
    }
}
