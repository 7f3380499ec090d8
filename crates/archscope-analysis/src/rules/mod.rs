//! Rules engine: selectors, conditions, custom rules and results.

pub mod condition;
pub mod custom;
pub(crate) mod evaluator;
pub mod predicate;
pub mod result;
pub mod ruleset;
pub mod selector;

pub use condition::ConditionPipeline;
pub use custom::{CustomRule, DependsOnModuleRule, FnRule, IsRecordRule, RuleRegistry};
pub use predicate::*;
pub use result::{DiagnosticKind, RuleDiagnostic, RuleResult};
pub use ruleset::{CompiledRule, CompiledRuleSet, RuleOutcome, RuleSet, RuleSetReport};
pub use selector::{select_types_in, Selector};
