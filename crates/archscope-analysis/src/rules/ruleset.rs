//! Declarative rule sets: `[[rules]]` tables compiled into pipelines.

use std::sync::Arc;

use archscope_core::config::{
    ArchscopeConfig, AssertionSpec, EngineConfig, PredicateSpec, RuleDefinition,
};
use archscope_core::errors::{ConfigError, RuleCompositionError};
use archscope_core::types::FxHashSet;
use serde::{Deserialize, Serialize};

use super::condition::ConditionPipeline;
use super::custom::{DependsOnModuleRule, RuleRegistry};
use super::predicate::{self, Predicate};
use super::result::RuleResult;
use super::selector::Selector;
use crate::model::ModuleDescriptor;

/// Uncompiled rule definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl RuleSet {
    pub fn new(rules: Vec<RuleDefinition>) -> Self {
        Self { rules }
    }

    /// The rules declared in a resolved configuration.
    pub fn from_config(config: &ArchscopeConfig) -> Self {
        Self::new(config.rules.clone())
    }

    /// Parse a standalone rules file (`[[rules]]` tables only).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<rules>".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve every enabled rule against `registry`.
    ///
    /// Fails on the first rule that cannot be composed. Ids must be unique
    /// across the whole set, disabled rules included; nothing else about a
    /// disabled rule is inspected.
    pub fn compile(
        &self,
        registry: &RuleRegistry,
    ) -> Result<CompiledRuleSet, RuleCompositionError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        let mut skipped = Vec::new();
        let mut seen = FxHashSet::default();

        for definition in &self.rules {
            if !seen.insert(definition.id.as_str()) {
                return Err(RuleCompositionError::DuplicateRuleId(definition.id.clone()));
            }
            if !definition.enabled {
                tracing::debug!(rule = %definition.id, "rule disabled, skipping");
                skipped.push(definition.id.clone());
                continue;
            }
            rules.push(CompiledRule::compile(definition, registry)?);
        }

        Ok(CompiledRuleSet { rules, skipped })
    }
}

/// One rule, ready to run against any module.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    id: String,
    description: Option<String>,
    predicates: Vec<Predicate>,
    assertion: Predicate,
    negated: bool,
}

impl CompiledRule {
    pub fn compile(
        definition: &RuleDefinition,
        registry: &RuleRegistry,
    ) -> Result<Self, RuleCompositionError> {
        if definition.id.trim().is_empty() {
            return Err(RuleCompositionError::EmptyRuleId);
        }
        let (spec, negated) = match (&definition.should, &definition.should_not) {
            (Some(spec), None) => (spec, false),
            (None, Some(spec)) => (spec, true),
            (None, None) => {
                return Err(RuleCompositionError::MissingCondition {
                    rule: definition.id.clone(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(RuleCompositionError::MultipleConditions {
                    rule: definition.id.clone(),
                })
            }
        };

        let predicates = definition
            .that
            .iter()
            .map(|p| build_predicate(p, registry))
            .collect::<Result<Vec<_>, _>>()?;
        let assertion = build_assertion(spec, registry)?;

        Ok(Self {
            id: definition.id.clone(),
            description: definition.description.clone(),
            predicates,
            assertion,
            negated,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The typed pipeline this rule stands for, bound to `module`.
    pub fn pipeline(&self, module: &Arc<ModuleDescriptor>) -> ConditionPipeline {
        let selector = self
            .predicates
            .iter()
            .cloned()
            .fold(Selector::new(Arc::clone(module)), |s, p| s.with_predicate(p));
        if self.negated {
            selector.should_not(self.assertion.clone())
        } else {
            selector.should(self.assertion.clone())
        }
    }
}

fn build_predicate(
    spec: &PredicateSpec,
    registry: &RuleRegistry,
) -> Result<Predicate, RuleCompositionError> {
    Ok(match spec {
        PredicateSpec::ImplementsInterface(name) => predicate::implements_interface(name.as_str()),
        PredicateSpec::ResidesInNamespace(ns) => predicate::resides_in_namespace(ns.as_str()),
        PredicateSpec::ResidesInNamespaceStartingWith(prefix) => {
            predicate::resides_in_namespace_starting_with(prefix.as_str())
        }
        PredicateSpec::ResidesInNamespaceEndingWith(suffix) => {
            predicate::resides_in_namespace_ending_with(suffix.as_str())
        }
        PredicateSpec::HasName(name) => predicate::has_name(name.as_str()),
        PredicateSpec::HasNameStartingWith(prefix) => {
            predicate::has_name_starting_with(prefix.as_str())
        }
        PredicateSpec::HasNameEndingWith(suffix) => {
            predicate::has_name_ending_with(suffix.as_str())
        }
        PredicateSpec::HasNameMatching(pattern) => predicate::has_name_matching(pattern)?,
        PredicateSpec::HasDependencyOn(fragment) => predicate::has_dependency_on(fragment.as_str()),
        PredicateSpec::IsPublic(true) => predicate::is_public(),
        PredicateSpec::IsPublic(false) => predicate::is_public().not(),
        PredicateSpec::MeetsCustomRule(name) => predicate::meets_custom_rule(registry.get(name)?),
    })
}

fn build_assertion(
    spec: &AssertionSpec,
    registry: &RuleRegistry,
) -> Result<Predicate, RuleCompositionError> {
    Ok(match spec {
        AssertionSpec::ResidesInNamespace(ns) => predicate::resides_in_namespace(ns.as_str()),
        AssertionSpec::ResidesInNamespaceEndingWith(suffix) => {
            predicate::resides_in_namespace_ending_with(suffix.as_str())
        }
        AssertionSpec::ResidesInNamespaceStartingWith(prefix) => {
            predicate::resides_in_namespace_starting_with(prefix.as_str())
        }
        AssertionSpec::ImplementsInterface(name) => predicate::implements_interface(name.as_str()),
        AssertionSpec::HasNameEndingWith(suffix) => {
            predicate::has_name_ending_with(suffix.as_str())
        }
        AssertionSpec::HasDependencyOn(fragment) => predicate::has_dependency_on(fragment.as_str()),
        AssertionSpec::DependsOnModule(name) => {
            predicate::meets_custom_rule(Arc::new(DependsOnModuleRule::new(name.as_str())))
        }
        AssertionSpec::MeetsCustomRule(name) => predicate::meets_custom_rule(registry.get(name)?),
    })
}

/// Compiled rules, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    rules: Vec<CompiledRule>,
    skipped: Vec<String>,
}

impl CompiledRuleSet {
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Ids of disabled rules.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn evaluate(&self, module: &Arc<ModuleDescriptor>, config: &EngineConfig) -> RuleSetReport {
        let outcomes: Vec<RuleOutcome> = self
            .rules
            .iter()
            .map(|rule| RuleOutcome {
                rule_id: rule.id.clone(),
                result: rule.pipeline(module).get_result_with(config),
            })
            .collect();

        let report = RuleSetReport { outcomes };
        tracing::info!(
            module = %module.name(),
            rules = report.outcomes.len(),
            failed = report.failed().count(),
            skipped = self.skipped.len(),
            "rule set evaluated"
        );
        report
    }
}

/// One rule's result within a rule set run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub result: RuleResult,
}

/// Results of every enabled rule, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl RuleSetReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_successful())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.result.is_successful())
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleResult> {
        self.outcomes
            .iter()
            .find(|o| o.rule_id == rule_id)
            .map(|o| &o.result)
    }
}

impl std::fmt::Display for RuleSetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}] {}", outcome.rule_id, outcome.result)?;
        }
        Ok(())
    }
}
