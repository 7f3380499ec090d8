//! Condition stage: one assertion attached to a selector.

use archscope_core::config::EngineConfig;

use super::evaluator;
use super::predicate::Predicate;
use super::result::RuleResult;
use super::selector::Selector;

/// A selector plus exactly one assertion, positive or negated.
///
/// Immutable; `get_result` can be called any number of times and always
/// yields the same result for the same module.
#[derive(Debug, Clone)]
pub struct ConditionPipeline {
    selector: Selector,
    assertion: Predicate,
    negated: bool,
}

impl ConditionPipeline {
    pub(crate) fn new(selector: Selector, assertion: Predicate, negated: bool) -> Self {
        Self {
            selector,
            assertion,
            negated,
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn assertion(&self) -> &Predicate {
        &self.assertion
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// `"<selector> should[ not] <assertion>"`.
    pub fn description(&self) -> String {
        let verb = if self.negated { "should not" } else { "should" };
        format!(
            "{} {} {}",
            self.selector.description(),
            verb,
            self.assertion.description()
        )
    }

    /// Evaluate with default engine settings (vacuous empty selection).
    pub fn get_result(&self) -> RuleResult {
        self.get_result_with(&EngineConfig::default())
    }

    /// Evaluate with explicit engine settings.
    pub fn get_result_with(&self, config: &EngineConfig) -> RuleResult {
        let selection = self.selector.select();
        let verdicts = evaluator::evaluate_candidates(
            &selection.candidates,
            &self.assertion,
            self.negated,
            config,
        );
        let result = RuleResult::aggregate(
            self.description(),
            &selection.candidates,
            verdicts,
            selection.diagnostics,
            config.effective_empty_selection(),
        );

        tracing::debug!(
            module = %self.selector.module().name(),
            rule = %result.rule_description(),
            candidates = result.candidate_count(),
            violations = result.violating_types().len(),
            passed = result.is_successful(),
            "rule evaluated"
        );
        result
    }
}
