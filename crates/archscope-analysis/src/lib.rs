//! Architecture-conformance rule engine.
//!
//! A [`model::ModuleDescriptor`] is produced by a [`provider::MetadataProvider`],
//! narrowed by a [`rules::Selector`], checked by a [`rules::ConditionPipeline`],
//! and reduced to a [`rules::RuleResult`]:
//!
//! ```ignore
//! let result = select_types_in(&module)
//!     .with_predicate(implements_interface("IRepository"))
//!     .should(resides_in_namespace_ending_with("Infrastructure"))
//!     .get_result();
//! assert!(result.is_successful());
//! ```

pub mod model;
pub mod provider;
pub mod rules;

pub use model::{
    types_of, InterfaceReference, MethodDescriptor, ModuleBuilder, ModuleDescriptor,
    ModuleReference, TypeBuilder, TypeDescriptor, TypeKind,
};
pub use provider::{load_module, provider_for_path, MetadataProvider};
pub use rules::{select_types_in, ConditionPipeline, Predicate, RuleResult, Selector};
