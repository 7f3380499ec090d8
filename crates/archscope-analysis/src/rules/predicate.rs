//! Predicates over types, shared by selectors and assertions.

use std::sync::Arc;

use archscope_core::errors::{RuleCompositionError, RuleEvaluationError};
use regex::Regex;

use super::custom::{self, CustomRule};
use crate::model::{TypeDescriptor, TypeKind};

type PredicateFn = dyn Fn(&TypeDescriptor) -> Result<bool, RuleEvaluationError> + Send + Sync;

/// A named test over a [`TypeDescriptor`].
///
/// Cheap to clone. The description reads as a verb phrase ("implement
/// interface 'IRepository'") so rule descriptions compose into sentences.
#[derive(Clone)]
pub struct Predicate {
    description: Arc<str>,
    test: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap an infallible check.
    pub fn new<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> bool + Send + Sync + 'static,
    {
        Self::fallible(description, move |ty| Ok(test(ty)))
    }

    /// Wrap a check that can fail for individual types.
    pub fn fallible<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Result<bool, RuleEvaluationError> + Send + Sync + 'static,
    {
        Self {
            description: Arc::from(description.into()),
            test: Arc::new(test),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn evaluate(&self, ty: &TypeDescriptor) -> Result<bool, RuleEvaluationError> {
        (self.test)(ty)
    }

    /// Logical negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        let description = format!("not {}", self.description);
        Self::fallible(description, move |ty| self.evaluate(ty).map(|b| !b))
    }

    /// Short-circuiting conjunction.
    pub fn and(self, other: Predicate) -> Self {
        let description = format!("({} and {})", self.description, other.description);
        Self::fallible(description, move |ty| {
            Ok(self.evaluate(ty)? && other.evaluate(ty)?)
        })
    }

    /// Short-circuiting disjunction.
    pub fn or(self, other: Predicate) -> Self {
        let description = format!("({} or {})", self.description, other.description);
        Self::fallible(description, move |ty| {
            Ok(self.evaluate(ty)? || other.evaluate(ty)?)
        })
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Predicate").field(&self.description).finish()
    }
}

/// Implements an interface, matched by qualified or simple name.
pub fn implements_interface(name: impl Into<String>) -> Predicate {
    let name = name.into();
    Predicate::new(format!("implement interface '{name}'"), move |ty| {
        ty.implements(&name)
    })
}

/// Declared directly in exactly this namespace.
pub fn resides_in_namespace(namespace: impl Into<String>) -> Predicate {
    let namespace = namespace.into();
    Predicate::new(format!("reside in namespace '{namespace}'"), move |ty| {
        ty.namespace() == namespace
    })
}

/// Declared in a namespace starting with `prefix`.
pub fn resides_in_namespace_starting_with(prefix: impl Into<String>) -> Predicate {
    let prefix = prefix.into();
    Predicate::new(
        format!("reside in namespace starting with '{prefix}'"),
        move |ty| ty.namespace().starts_with(&prefix),
    )
}

/// Declared in a namespace ending with `suffix`, directly or nested inside it.
///
/// The type's own namespace is a plain suffix match. Enclosing namespaces
/// must end on a whole segment: `EShop.Infrastructure.Products` matches
/// `Infrastructure` through `EShop.Infrastructure`, but nothing under `EShop`
/// matches `Shop`.
pub fn resides_in_namespace_ending_with(suffix: impl Into<String>) -> Predicate {
    let suffix = suffix.into();
    let segment = format!(".{suffix}");
    Predicate::new(
        format!("reside in namespace ending with '{suffix}'"),
        move |ty| {
            let mut chain = ty.namespace_chain();
            chain.next().is_some_and(|ns| ns.ends_with(&suffix))
                || chain.any(|ns| ns == suffix || ns.ends_with(&segment))
        },
    )
}

/// Simple name equals `name`.
pub fn has_name(name: impl Into<String>) -> Predicate {
    let name = name.into();
    Predicate::new(format!("have name '{name}'"), move |ty| ty.name() == name)
}

pub fn has_name_starting_with(prefix: impl Into<String>) -> Predicate {
    let prefix = prefix.into();
    Predicate::new(format!("have name starting with '{prefix}'"), move |ty| {
        ty.name().starts_with(&prefix)
    })
}

pub fn has_name_ending_with(suffix: impl Into<String>) -> Predicate {
    let suffix = suffix.into();
    Predicate::new(format!("have name ending with '{suffix}'"), move |ty| {
        ty.name().ends_with(&suffix)
    })
}

/// Simple name matches a regular expression.
pub fn has_name_matching(pattern: &str) -> Result<Predicate, RuleCompositionError> {
    let regex = Regex::new(pattern).map_err(|e| RuleCompositionError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(Predicate::new(
        format!("have name matching '{pattern}'"),
        move |ty| regex.is_match(ty.name()),
    ))
}

pub fn is_public() -> Predicate {
    Predicate::new("be public", TypeDescriptor::is_public)
}

pub fn is_of_kind(kind: TypeKind) -> Predicate {
    Predicate::new(format!("be {kind}"), move |ty| ty.kind() == kind)
}

/// The owning module references a module whose name contains `fragment`.
pub fn has_dependency_on(fragment: impl Into<String>) -> Predicate {
    let fragment = fragment.into();
    Predicate::fallible(format!("have dependency on '{fragment}'"), move |ty| {
        let module = ty
            .module()
            .ok_or_else(|| RuleEvaluationError::DetachedType(ty.qualified_name().to_string()))?;
        Ok(module.references_module_containing(&fragment))
    })
}

/// Delegate to a custom rule. Errors and panics inside the rule surface as
/// [`RuleEvaluationError`] for the type being checked.
pub fn meets_custom_rule(rule: Arc<dyn CustomRule>) -> Predicate {
    Predicate::fallible(
        format!("meet custom rule '{}'", rule.name()),
        move |ty| custom::invoke_isolated(rule.as_ref(), ty),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModuleBuilder, TypeBuilder};

    fn sample() -> std::sync::Arc<crate::model::ModuleDescriptor> {
        ModuleBuilder::new("EShop.Infrastructure")
            .reference("EShop.Domains")
            .with_type(
                TypeBuilder::new("EShop.Infrastructure.Products.ProductRepository")
                    .implements("EShop.Domains.IRepository"),
            )
            .with_type(TypeBuilder::new("EShop.InfrastructureX.Helper").public(false))
            .with_type(TypeBuilder::new("EShop.Api.IInfrastructure").kind(TypeKind::Interface))
            .build()
    }

    #[test]
    fn test_namespace_ending_with_checks_enclosing_namespaces() {
        let module = sample();
        let p = resides_in_namespace_ending_with("Infrastructure");
        assert!(p.evaluate(&module.types()[0]).unwrap());
        assert!(!p.evaluate(&module.types()[1]).unwrap());
        assert!(!p.evaluate(&module.types()[2]).unwrap());
    }

    #[test]
    fn test_namespace_ending_with_enclosing_needs_whole_segment() {
        let module = ModuleBuilder::new("M")
            .with_type(TypeBuilder::new("EShop.Domains.Products.ProductRepository"))
            .with_type(TypeBuilder::new("Shop.Domains.Order"))
            .with_type(TypeBuilder::new("App.EShop.Cart"))
            .build();
        let p = resides_in_namespace_ending_with("Shop");
        assert!(!p.evaluate(&module.types()[0]).unwrap());
        assert!(p.evaluate(&module.types()[1]).unwrap());
        assert!(p.evaluate(&module.types()[2]).unwrap());

        let p = resides_in_namespace_ending_with("Domains");
        assert!(p.evaluate(&module.types()[0]).unwrap());
        let p = resides_in_namespace_ending_with("ains");
        assert!(!p.evaluate(&module.types()[0]).unwrap());
    }

    #[test]
    fn test_namespace_exact_match_is_not_hierarchical() {
        let module = sample();
        let p = resides_in_namespace("EShop.Infrastructure");
        assert!(!p.evaluate(&module.types()[0]).unwrap());
        let p = resides_in_namespace("EShop.Infrastructure.Products");
        assert!(p.evaluate(&module.types()[0]).unwrap());
    }

    #[test]
    fn test_combinators_compose_descriptions() {
        let p = has_name_ending_with("Repository").and(is_public()).not();
        assert_eq!(
            p.description(),
            "not (have name ending with 'Repository' and be public)"
        );
        let module = sample();
        assert!(!p.evaluate(&module.types()[0]).unwrap());
        assert!(p.evaluate(&module.types()[1]).unwrap());
    }

    #[test]
    fn test_or_combinator() {
        let module = sample();
        let p = is_of_kind(TypeKind::Interface).or(implements_interface("IRepository"));
        let hits: Vec<bool> = module
            .types()
            .iter()
            .map(|t| p.evaluate(t).unwrap())
            .collect();
        assert_eq!(hits, vec![true, false, true]);
    }

    #[test]
    fn test_invalid_regex_is_composition_error() {
        let err = has_name_matching("(unclosed").unwrap_err();
        assert!(matches!(err, RuleCompositionError::InvalidPattern { .. }));
        let p = has_name_matching("^Product.*y$").unwrap();
        assert!(p.evaluate(&sample().types()[0]).unwrap());
    }

    #[test]
    fn test_has_dependency_on_substring() {
        let module = sample();
        assert!(has_dependency_on("Domains").evaluate(&module.types()[0]).unwrap());
        assert!(!has_dependency_on("Api").evaluate(&module.types()[0]).unwrap());
    }

    #[test]
    fn test_has_dependency_on_detached_type_errors() {
        let ty = sample().types()[0].clone();
        let err = has_dependency_on("Domains").evaluate(&ty).unwrap_err();
        assert!(matches!(err, RuleEvaluationError::DetachedType(_)));
    }
}
