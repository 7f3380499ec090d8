//! Construction of immutable module snapshots.

use std::sync::{Arc, Weak};

use archscope_core::types::{FxHashSet, SmallVec4};

use super::types::{
    simple_name_of, InterfaceReference, MethodDescriptor, ModuleDescriptor, ModuleReference,
    TypeDescriptor, TypeKind,
};

/// Collects module metadata, then freezes it with [`ModuleBuilder::build`].
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    name: String,
    version: Option<String>,
    references: Vec<ModuleReference>,
    types: Vec<TypeBuilder>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            references: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a dependency reference by name.
    pub fn reference(self, name: impl Into<String>) -> Self {
        self.with_reference(ModuleReference::new(name))
    }

    pub fn with_reference(mut self, reference: ModuleReference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn with_type(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty);
        self
    }

    /// Freeze into a shared, read-only module.
    ///
    /// Duplicate references collapse to their first occurrence; types keep
    /// the order they were added in.
    pub fn build(self) -> Arc<ModuleDescriptor> {
        let mut seen = FxHashSet::default();
        let referenced_modules: Vec<ModuleReference> = self
            .references
            .into_iter()
            .filter(|r| seen.insert(r.clone()))
            .collect();
        let types = self.types;

        Arc::new_cyclic(|owner: &Weak<ModuleDescriptor>| ModuleDescriptor {
            name: self.name,
            version: self.version,
            referenced_modules,
            types: types.into_iter().map(|t| t.finish(owner.clone())).collect(),
        })
    }
}

/// Describes one type before it is attached to a module.
///
/// Namespace and simple name are derived from the qualified name unless set
/// explicitly.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    qualified_name: String,
    namespace: Option<String>,
    name: Option<String>,
    kind: TypeKind,
    is_public: bool,
    interfaces: SmallVec4<InterfaceReference>,
    methods: Vec<MethodDescriptor>,
}

impl TypeBuilder {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            namespace: None,
            name: None,
            kind: TypeKind::Class,
            is_public: true,
            interfaces: SmallVec4::new(),
            methods: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        let iface = InterfaceReference::new(interface);
        if !self.interfaces.contains(&iface) {
            self.interfaces.push(iface);
        }
        self
    }

    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(MethodDescriptor::authored(name));
        self
    }

    pub fn synthesized_method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(MethodDescriptor::synthesized(name));
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn finish(self, module: Weak<ModuleDescriptor>) -> TypeDescriptor {
        let derived_namespace = match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[..idx],
            None => "",
        };
        TypeDescriptor {
            namespace: self
                .namespace
                .unwrap_or_else(|| derived_namespace.to_string()),
            name: self
                .name
                .unwrap_or_else(|| simple_name_of(&self.qualified_name).to_string()),
            qualified_name: self.qualified_name,
            kind: self.kind,
            is_public: self.is_public,
            implemented_interfaces: self.interfaces,
            methods: self.methods,
            module,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_namespace_and_name() {
        let module = ModuleBuilder::new("EShop.Domains")
            .with_type(TypeBuilder::new("EShop.Domains.Products.ProductDto"))
            .build();
        let ty = &module.types()[0];
        assert_eq!(ty.namespace(), "EShop.Domains.Products");
        assert_eq!(ty.name(), "ProductDto");
        assert_eq!(ty.kind(), TypeKind::Class);
        assert!(ty.is_public());
    }

    #[test]
    fn test_explicit_namespace_wins() {
        let module = ModuleBuilder::new("M")
            .with_type(TypeBuilder::new("Outer+Inner").namespace("EShop").name("Inner"))
            .build();
        let ty = &module.types()[0];
        assert_eq!(ty.namespace(), "EShop");
        assert_eq!(ty.name(), "Inner");
    }

    #[test]
    fn test_duplicate_references_collapse_in_order() {
        let module = ModuleBuilder::new("M")
            .reference("B")
            .reference("A")
            .reference("B")
            .build();
        let names: Vec<&str> = module
            .referenced_modules()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_types_keep_declaration_order() {
        let module = ModuleBuilder::new("M")
            .with_type(TypeBuilder::new("N.Zeta"))
            .with_type(TypeBuilder::new("N.Alpha"))
            .with_type(TypeBuilder::new("N.Mid"))
            .build();
        let names: Vec<&str> = module.types().iter().map(|t| t.qualified_name()).collect();
        assert_eq!(names, vec!["N.Zeta", "N.Alpha", "N.Mid"]);
    }

    #[test]
    fn test_duplicate_interfaces_ignored() {
        let module = ModuleBuilder::new("M")
            .with_type(TypeBuilder::new("N.T").implements("IRepo").implements("IRepo"))
            .build();
        assert_eq!(module.types()[0].implemented_interfaces().len(), 1);
    }
}
