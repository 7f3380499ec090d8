//! Custom rules: assertions beyond the built-in vocabulary.
//!
//! A custom rule implements one function, [`CustomRule::meets_rule`]. Rules
//! are registered by name in a [`RuleRegistry`] so declarative rule sets can
//! refer to them.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use archscope_core::config::ConventionsConfig;
use archscope_core::errors::{RuleCompositionError, RuleEvaluationError};
use archscope_core::types::FxHashMap;

use crate::model::TypeDescriptor;

/// A user-supplied structural check over a single type.
pub trait CustomRule: Send + Sync {
    /// Stable name used in descriptions, diagnostics, and the registry.
    fn name(&self) -> &str;

    /// Whether `ty` satisfies the rule.
    ///
    /// Returning `Err` marks this one type as non-conforming; the rest of
    /// the evaluation continues.
    fn meets_rule(&self, ty: &TypeDescriptor) -> Result<bool, RuleEvaluationError>;
}

/// Run a rule, turning a panic into a [`RuleEvaluationError::RulePanicked`].
pub(crate) fn invoke_isolated(
    rule: &dyn CustomRule,
    ty: &TypeDescriptor,
) -> Result<bool, RuleEvaluationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.meets_rule(ty))) {
        Ok(outcome) => outcome,
        Err(_) => Err(RuleEvaluationError::RulePanicked {
            rule: rule.name().to_string(),
            type_name: ty.qualified_name().to_string(),
        }),
    }
}

/// Adapts a closure into a [`CustomRule`].
pub struct FnRule<F> {
    name: String,
    check: F,
}

impl<F> FnRule<F>
where
    F: Fn(&TypeDescriptor) -> Result<bool, RuleEvaluationError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> CustomRule for FnRule<F>
where
    F: Fn(&TypeDescriptor) -> Result<bool, RuleEvaluationError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn meets_rule(&self, ty: &TypeDescriptor) -> Result<bool, RuleEvaluationError> {
        (self.check)(ty)
    }
}

/// Detects record-like types: the compiler synthesizes a clone method with
/// a reserved name for them.
#[derive(Debug, Clone)]
pub struct IsRecordRule {
    clone_method: String,
}

impl IsRecordRule {
    pub const NAME: &'static str = "is_record";

    pub fn new() -> Self {
        Self::with_conventions(&ConventionsConfig::default())
    }

    pub fn with_conventions(conventions: &ConventionsConfig) -> Self {
        Self {
            clone_method: conventions.effective_record_clone_method().to_string(),
        }
    }

    pub fn clone_method(&self) -> &str {
        &self.clone_method
    }
}

impl Default for IsRecordRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomRule for IsRecordRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meets_rule(&self, ty: &TypeDescriptor) -> Result<bool, RuleEvaluationError> {
        Ok(ty
            .methods()
            .iter()
            .any(|m| m.is_compiler_synthesized && m.name == self.clone_method))
    }
}

/// The owning module references a module named exactly `target`.
#[derive(Debug, Clone)]
pub struct DependsOnModuleRule {
    name: String,
    target: String,
}

impl DependsOnModuleRule {
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            name: format!("depends_on_module({target})"),
            target,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl CustomRule for DependsOnModuleRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn meets_rule(&self, ty: &TypeDescriptor) -> Result<bool, RuleEvaluationError> {
        let module = ty
            .module()
            .ok_or_else(|| RuleEvaluationError::DetachedType(ty.qualified_name().to_string()))?;
        Ok(module.references_module(&self.target))
    }
}

/// Named custom rules available to declarative rule sets.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: FxHashMap<String, Arc<dyn CustomRule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in rules, configured by `conventions`.
    pub fn with_builtins(conventions: &ConventionsConfig) -> Self {
        let mut registry = Self::new();
        registry.rules.insert(
            IsRecordRule::NAME.to_string(),
            Arc::new(IsRecordRule::with_conventions(conventions)),
        );
        registry
    }

    /// Register a rule under its own name.
    pub fn register(&mut self, rule: Arc<dyn CustomRule>) -> Result<(), RuleCompositionError> {
        let name = rule.name().to_string();
        if self.rules.contains_key(&name) {
            return Err(RuleCompositionError::DuplicateCustomRule(name));
        }
        tracing::debug!(rule = %name, "custom rule registered");
        self.rules.insert(name, rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn CustomRule>, RuleCompositionError> {
        self.rules
            .get(name)
            .cloned()
            .ok_or_else(|| RuleCompositionError::UnknownCustomRule(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry").field("rules", &self.names()).finish()
    }
}
