//! Per-type custom rule failures.

use super::error_code::{self, ArchscopeErrorCode};

/// A custom rule failed while inspecting a single type.
///
/// Recovered locally: the type is reported as non-conforming and the
/// error is attached to the result as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleEvaluationError {
    #[error("Rule '{rule}' failed on {type_name}: {message}")]
    RuleFailed {
        rule: String,
        type_name: String,
        message: String,
    },

    #[error("Rule '{rule}' panicked on {type_name}")]
    RulePanicked { rule: String, type_name: String },

    #[error("Type {0} is detached from its owning module")]
    DetachedType(String),
}

impl RuleEvaluationError {
    /// Convenience constructor for rule implementations.
    pub fn failed(
        rule: impl Into<String>,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RuleFailed {
            rule: rule.into(),
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

impl ArchscopeErrorCode for RuleEvaluationError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_EVALUATION_ERROR
    }
}
