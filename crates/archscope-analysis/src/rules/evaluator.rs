//! Per-candidate assertion evaluation, sequential or on the rayon pool.

use archscope_core::config::EngineConfig;
use archscope_core::errors::RuleEvaluationError;
use rayon::prelude::*;

use super::predicate::Predicate;
use crate::model::TypeDescriptor;

/// How one candidate fared against the assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    Conforming,
    Violation,
    /// The assertion itself failed; counted as a violation.
    Failed(RuleEvaluationError),
}

/// Judge a single candidate. A type conforms when the assertion's outcome
/// equals `!negated`.
fn judge(assertion: &Predicate, negated: bool, ty: &TypeDescriptor) -> Verdict {
    match assertion.evaluate(ty) {
        Ok(outcome) if outcome != negated => Verdict::Conforming,
        Ok(_) => Verdict::Violation,
        Err(error) => {
            tracing::warn!(
                type_name = %ty.qualified_name(),
                assertion = %assertion.description(),
                error = %error,
                "assertion failed for candidate, counting it as a violation"
            );
            Verdict::Failed(error)
        }
    }
}

/// Judge every candidate. The returned verdicts line up index-for-index with
/// `candidates`, whichever path runs.
pub(crate) fn evaluate_candidates(
    candidates: &[&TypeDescriptor],
    assertion: &Predicate,
    negated: bool,
    config: &EngineConfig,
) -> Vec<Verdict> {
    if should_parallelize(candidates.len(), config) {
        candidates
            .par_iter()
            .map(|ty| judge(assertion, negated, ty))
            .collect()
    } else {
        candidates
            .iter()
            .map(|ty| judge(assertion, negated, ty))
            .collect()
    }
}

fn should_parallelize(count: usize, config: &EngineConfig) -> bool {
    config.effective_parallel() && count >= config.effective_parallel_threshold()
}
