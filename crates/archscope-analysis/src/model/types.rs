//! Module, type, method, and reference descriptors.

use std::sync::{Arc, Weak};

use archscope_core::types::SmallVec4;
use serde::{Deserialize, Serialize};

/// One compiled unit: its dependency references and the types it declares.
///
/// Built once through [`super::ModuleBuilder`] and shared as an
/// `Arc<ModuleDescriptor>`. There is no mutation API.
#[derive(Debug)]
pub struct ModuleDescriptor {
    pub(crate) name: String,
    pub(crate) version: Option<String>,
    pub(crate) referenced_modules: Vec<ModuleReference>,
    pub(crate) types: Vec<TypeDescriptor>,
}

impl ModuleDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Direct dependency references, in declaration order, without duplicates.
    pub fn referenced_modules(&self) -> &[ModuleReference] {
        &self.referenced_modules
    }

    /// Declared types, in declaration order.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Look up a type by qualified name.
    pub fn find_type(&self, qualified_name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.qualified_name == qualified_name)
    }

    /// Whether any referenced module's name contains `fragment`.
    pub fn references_module_containing(&self, fragment: &str) -> bool {
        self.referenced_modules.iter().any(|r| r.name.contains(fragment))
    }

    /// Whether a referenced module is named exactly `name`.
    pub fn references_module(&self, name: &str) -> bool {
        self.referenced_modules.iter().any(|r| r.name == name)
    }
}

/// The declared types of `module`, in declaration order.
pub fn types_of(module: &ModuleDescriptor) -> &[TypeDescriptor] {
    module.types()
}

/// A dependency edge from one module to another, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ModuleReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

impl std::fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} {}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

/// An interface a type claims to implement, by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceReference {
    pub qualified_name: String,
}

impl InterfaceReference {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.qualified_name)
    }

    /// Matches either the qualified name or the simple name.
    pub fn matches(&self, name: &str) -> bool {
        self.qualified_name == name || self.simple_name() == name
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub name: String,
    /// Generated by the compiler rather than written by the author.
    pub is_compiler_synthesized: bool,
}

impl MethodDescriptor {
    pub fn authored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_compiler_synthesized: false,
        }
    }

    pub fn synthesized(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_compiler_synthesized: true,
        }
    }
}

/// What sort of declaration a type is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared type.
///
/// Holds a weak back-reference to its owning module: the module owns the
/// type, never the other way round.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub(crate) qualified_name: String,
    pub(crate) name: String,
    pub(crate) namespace: String,
    pub(crate) kind: TypeKind,
    pub(crate) is_public: bool,
    pub(crate) implemented_interfaces: SmallVec4<InterfaceReference>,
    pub(crate) methods: Vec<MethodDescriptor>,
    pub(crate) module: Weak<ModuleDescriptor>,
}

impl TypeDescriptor {
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple (unqualified) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn implemented_interfaces(&self) -> &[InterfaceReference] {
        &self.implemented_interfaces
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.implemented_interfaces.iter().any(|i| i.matches(interface))
    }

    /// The owning module, or `None` if it has been dropped.
    pub fn module(&self) -> Option<Arc<ModuleDescriptor>> {
        self.module.upgrade()
    }

    /// The namespace and every enclosing namespace, innermost first.
    ///
    /// `A.B.C` yields `A.B.C`, `A.B`, `A`. The global namespace yields nothing.
    pub fn namespace_chain(&self) -> impl Iterator<Item = &str> {
        let ns = self.namespace.as_str();
        let mut end = if ns.is_empty() { None } else { Some(ns.len()) };
        std::iter::from_fn(move || {
            let current = end?;
            let segment = &ns[..current];
            end = segment.rfind('.');
            Some(segment)
        })
    }
}

/// Last `.`-separated segment of a qualified name.
pub(crate) fn simple_name_of(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
