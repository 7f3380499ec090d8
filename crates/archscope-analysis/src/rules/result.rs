//! The single verdict a pipeline produces.

use archscope_core::config::EmptySelectionPolicy;
use archscope_core::errors::{ArchscopeErrorCode, RuleEvaluationError};
use serde::{Deserialize, Serialize};

use super::evaluator::Verdict;
use crate::model::TypeDescriptor;

/// Outcome of one rule over one module. Self-describing, so reporters need
/// no access to the metadata model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    is_successful: bool,
    violating_types: Vec<String>,
    rule_description: String,
    candidate_count: usize,
    diagnostics: Vec<RuleDiagnostic>,
}

/// Extended detail attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    /// Qualified name of the affected type, if the diagnostic concerns one.
    pub type_name: Option<String>,
    pub kind: DiagnosticKind,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A selector predicate failed; the type was left out of the candidates.
    SelectionFailed,
    /// The assertion failed; the type counts as a violation.
    EvaluationFailed,
    /// Nothing matched the selector under the strict policy.
    EmptySelection,
}

impl RuleDiagnostic {
    pub(crate) fn from_error(
        kind: DiagnosticKind,
        type_name: &str,
        error: &RuleEvaluationError,
    ) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            kind,
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl RuleResult {
    /// Reduce per-candidate verdicts to one result.
    ///
    /// `candidates` and `verdicts` are parallel slices in declaration order.
    pub(crate) fn aggregate(
        rule_description: String,
        candidates: &[&TypeDescriptor],
        verdicts: Vec<Verdict>,
        mut diagnostics: Vec<RuleDiagnostic>,
        policy: EmptySelectionPolicy,
    ) -> Self {
        debug_assert_eq!(candidates.len(), verdicts.len());

        let mut violating_types = Vec::new();
        for (ty, verdict) in candidates.iter().zip(verdicts) {
            match verdict {
                Verdict::Conforming => {}
                Verdict::Violation => violating_types.push(ty.qualified_name().to_string()),
                Verdict::Failed(error) => {
                    diagnostics.push(RuleDiagnostic::from_error(
                        DiagnosticKind::EvaluationFailed,
                        ty.qualified_name(),
                        &error,
                    ));
                    violating_types.push(ty.qualified_name().to_string());
                }
            }
        }

        let is_successful = if candidates.is_empty() {
            match policy {
                EmptySelectionPolicy::Vacuous => true,
                EmptySelectionPolicy::Strict => {
                    diagnostics.push(RuleDiagnostic {
                        type_name: None,
                        kind: DiagnosticKind::EmptySelection,
                        code: "EMPTY_SELECTION".to_string(),
                        message: "no types matched the selector".to_string(),
                    });
                    false
                }
            }
        } else {
            violating_types.is_empty()
        };

        Self {
            is_successful,
            violating_types,
            rule_description,
            candidate_count: candidates.len(),
            diagnostics,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.is_successful
    }

    /// Qualified names of non-conforming types, in declaration order.
    pub fn violating_types(&self) -> &[String] {
        &self.violating_types
    }

    pub fn rule_description(&self) -> &str {
        &self.rule_description
    }

    /// Number of types the selector matched.
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    pub fn diagnostics(&self) -> &[RuleDiagnostic] {
        &self.diagnostics
    }

    /// Diagnostics for one type.
    pub fn diagnostics_for<'a>(
        &'a self,
        qualified_name: &'a str,
    ) -> impl Iterator<Item = &'a RuleDiagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.type_name.as_deref() == Some(qualified_name))
    }
}

impl std::fmt::Display for RuleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.is_successful { "PASS" } else { "FAIL" };
        write!(
            f,
            "{verdict}: {} ({} candidate(s), {} violation(s))",
            self.rule_description,
            self.candidate_count,
            self.violating_types.len()
        )?;
        for name in &self.violating_types {
            write!(f, "\n  - {name}")?;
            for d in self.diagnostics_for(name) {
                write!(f, " [{}] {}", d.code, d.message)?;
            }
        }
        for d in self.diagnostics.iter().filter(|d| d.type_name.is_none()) {
            write!(f, "\n  ! [{}] {}", d.code, d.message)?;
        }
        Ok(())
    }
}
