use std::sync::Arc;

use archscope_analysis::model::{ModuleBuilder, ModuleDescriptor, TypeBuilder};
use archscope_analysis::rules::*;
use archscope_core::config::EngineConfig;
use proptest::prelude::*;

const NAMESPACES: [&str; 4] = [
    "App.Domain",
    "App.Infrastructure",
    "App.Infrastructure.Data",
    "App.Api",
];
const SUFFIXES: [&str; 3] = ["Repository", "Dto", "Service"];

/// (namespace index, suffix index, implements IRepository)
fn arb_types() -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..NAMESPACES.len(), 0..SUFFIXES.len(), any::<bool>()), 0..60)
}

fn build(types: &[(usize, usize, bool)]) -> Arc<ModuleDescriptor> {
    let mut builder = ModuleBuilder::new("App").reference("App.Shared");
    for (i, &(ns, suffix, repo)) in types.iter().enumerate() {
        let mut ty = TypeBuilder::new(format!("{}.T{i}{}", NAMESPACES[ns], SUFFIXES[suffix]));
        if repo {
            ty = ty.implements("App.Domain.IRepository");
        }
        builder = builder.with_type(ty);
    }
    builder.build()
}

fn arb_assertion() -> impl Strategy<Value = Predicate> {
    prop_oneof![
        Just(resides_in_namespace_ending_with("Infrastructure")),
        Just(resides_in_namespace("App.Api")),
        Just(has_name_ending_with("Dto")),
        Just(implements_interface("IRepository")),
        Just(has_dependency_on("Shared")),
    ]
}

proptest! {
    #[test]
    fn empty_selection_is_vacuously_true(types in arb_types(), assertion in arb_assertion()) {
        let module = build(&types);
        let result = select_types_in(&module)
            .with_predicate(has_name("NoSuchType"))
            .should(assertion)
            .get_result();
        prop_assert!(result.is_successful());
        prop_assert!(result.violating_types().is_empty());
        prop_assert_eq!(result.candidate_count(), 0);
    }

    #[test]
    fn should_and_should_not_partition_candidates(
        types in arb_types(),
        assertion in arb_assertion(),
    ) {
        let module = build(&types);
        let selector = select_types_in(&module).with_predicate(has_name_ending_with("Repository"));
        let positive = selector.should(assertion.clone()).get_result();
        let negative = selector.should_not(assertion).get_result();

        let mut union: Vec<&String> = positive
            .violating_types()
            .iter()
            .chain(negative.violating_types())
            .collect();
        union.sort();
        let mut candidates: Vec<&str> = selector
            .candidates()
            .into_iter()
            .map(|t| t.qualified_name())
            .collect();
        candidates.sort_unstable();

        prop_assert_eq!(union.len(), candidates.len());
        prop_assert!(union.iter().zip(&candidates).all(|(a, b)| a.as_str() == *b));
    }

    #[test]
    fn parallel_matches_sequential(types in arb_types(), assertion in arb_assertion()) {
        let module = build(&types);
        let pipeline = select_types_in(&module).should(assertion);
        let parallel = EngineConfig {
            parallel_threshold: Some(1),
            ..Default::default()
        };
        prop_assert_eq!(
            pipeline.get_result_with(&parallel),
            pipeline.get_result_with(&EngineConfig::sequential())
        );
    }

    #[test]
    fn violations_follow_declaration_order(types in arb_types(), assertion in arb_assertion()) {
        let module = build(&types);
        let parallel = EngineConfig {
            parallel_threshold: Some(1),
            ..Default::default()
        };
        let result = select_types_in(&module)
            .should(assertion)
            .get_result_with(&parallel);

        let positions: Vec<usize> = result
            .violating_types()
            .iter()
            .filter_map(|name| module.types().iter().position(|t| t.qualified_name() == name))
            .collect();
        prop_assert_eq!(positions.len(), result.violating_types().len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn evaluation_is_idempotent(types in arb_types(), assertion in arb_assertion()) {
        let module = build(&types);
        let pipeline = select_types_in(&module)
            .with_predicate(implements_interface("IRepository"))
            .should(assertion);
        let first = pipeline.get_result();
        prop_assert_eq!(&first, &pipeline.get_result());
        prop_assert_eq!(first.is_successful(), first.violating_types().is_empty());
    }
}
