//! Selector, the filter stage of a rule.

use std::sync::Arc;

use super::condition::ConditionPipeline;
use super::predicate::Predicate;
use super::result::{DiagnosticKind, RuleDiagnostic};
use crate::model::{ModuleDescriptor, TypeDescriptor};

/// An immutable conjunction of predicates over one module's types.
///
/// Every builder method returns a new selector; a partially built selector
/// can be shared and extended in several directions.
#[derive(Debug, Clone)]
pub struct Selector {
    module: Arc<ModuleDescriptor>,
    predicates: Vec<Predicate>,
}

/// Start a rule over `module`. With no predicates every type is selected.
pub fn select_types_in(module: &Arc<ModuleDescriptor>) -> Selector {
    Selector::new(Arc::clone(module))
}

/// Candidates a selector matched, plus any predicate failures.
pub(crate) struct Selection<'m> {
    pub candidates: Vec<&'m TypeDescriptor>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

impl Selector {
    pub fn new(module: Arc<ModuleDescriptor>) -> Self {
        Self {
            module,
            predicates: Vec::new(),
        }
    }

    /// A new selector with `predicate` ANDed onto this one.
    pub fn with_predicate(&self, predicate: Predicate) -> Selector {
        let mut predicates = Vec::with_capacity(self.predicates.len() + 1);
        predicates.extend(self.predicates.iter().cloned());
        predicates.push(predicate);
        Selector {
            module: Arc::clone(&self.module),
            predicates,
        }
    }

    /// Attach a positive assertion.
    pub fn should(&self, assertion: Predicate) -> ConditionPipeline {
        ConditionPipeline::new(self.clone(), assertion, false)
    }

    /// Attach a negated assertion.
    pub fn should_not(&self, assertion: Predicate) -> ConditionPipeline {
        ConditionPipeline::new(self.clone(), assertion, true)
    }

    pub fn module(&self) -> &Arc<ModuleDescriptor> {
        &self.module
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Matching types, in declaration order.
    pub fn candidates(&self) -> Vec<&TypeDescriptor> {
        self.select().candidates
    }

    /// Number of matching types. Lets callers tell "nothing matched" apart
    /// from "everything passed".
    pub fn candidate_count(&self) -> usize {
        self.select().candidates.len()
    }

    /// `"types that <p1> and <p2>"`, or `"all types"` when unfiltered.
    pub fn description(&self) -> String {
        if self.predicates.is_empty() {
            return "all types".to_string();
        }
        let clauses: Vec<&str> = self.predicates.iter().map(Predicate::description).collect();
        format!("types that {}", clauses.join(" and "))
    }

    /// Evaluate the predicates. A predicate error drops the type from the
    /// candidates and records a diagnostic.
    pub(crate) fn select(&self) -> Selection<'_> {
        let mut candidates = Vec::new();
        let mut diagnostics = Vec::new();

        'types: for ty in self.module.types() {
            for predicate in &self.predicates {
                match predicate.evaluate(ty) {
                    Ok(true) => {}
                    Ok(false) => continue 'types,
                    Err(error) => {
                        tracing::warn!(
                            type_name = %ty.qualified_name(),
                            predicate = %predicate.description(),
                            error = %error,
                            "selector predicate failed, excluding type"
                        );
                        diagnostics.push(RuleDiagnostic::from_error(
                            DiagnosticKind::SelectionFailed,
                            ty.qualified_name(),
                            &error,
                        ));
                        continue 'types;
                    }
                }
            }
            candidates.push(ty);
        }

        Selection {
            candidates,
            diagnostics,
        }
    }
}
