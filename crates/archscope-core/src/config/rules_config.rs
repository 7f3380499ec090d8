//! Declarative rule definitions (`[[rules]]` tables).
//!
//! These are plain data. The analysis crate compiles them into pipelines
//! and reports composition errors there.

use serde::{Deserialize, Serialize};

/// One rule as written in `archscope.toml`.
///
/// ```toml
/// [[rules]]
/// id = "repositories-in-infrastructure"
/// that = [{ implements_interface = "IRepository" }]
/// should = { resides_in_namespace_ending_with = "Infrastructure" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Selector predicates, ANDed.
    #[serde(default)]
    pub that: Vec<PredicateSpec>,
    #[serde(default)]
    pub should: Option<AssertionSpec>,
    #[serde(default)]
    pub should_not: Option<AssertionSpec>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A built-in selector predicate, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSpec {
    ImplementsInterface(String),
    ResidesInNamespace(String),
    ResidesInNamespaceStartingWith(String),
    ResidesInNamespaceEndingWith(String),
    HasName(String),
    HasNameStartingWith(String),
    HasNameEndingWith(String),
    HasNameMatching(String),
    HasDependencyOn(String),
    IsPublic(bool),
    /// Any registered custom rule used as a filter.
    MeetsCustomRule(String),
}

/// A condition-stage assertion, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionSpec {
    ResidesInNamespace(String),
    ResidesInNamespaceEndingWith(String),
    ResidesInNamespaceStartingWith(String),
    ImplementsInterface(String),
    HasNameEndingWith(String),
    HasDependencyOn(String),
    /// Exact-name module dependency (the reference `DependsOnModuleRule`).
    DependsOnModule(String),
    MeetsCustomRule(String),
}
