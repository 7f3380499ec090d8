//! Serialized module manifest shared by every provider.
//!
//! ```text
//! bytes ──serde──▶ ModuleManifest ──validate──▶ ModuleBuilder ──▶ Arc<ModuleDescriptor>
//! ```

use std::sync::Arc;

use archscope_core::errors::LoadError;
use archscope_core::types::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::model::{ModuleBuilder, ModuleDescriptor, ModuleReference, TypeBuilder, TypeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub references: Vec<ReferenceManifest>,
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

/// A dependency, either a bare name or `{ name, version }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceManifest {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeManifest {
    pub qualified_name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

fn default_public() -> bool {
    true
}

/// A method, either a bare (authored) name or `{ name, synthesized }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodManifest {
    Name(String),
    Full {
        name: String,
        #[serde(default, alias = "is_compiler_synthesized")]
        synthesized: bool,
    },
}

impl ModuleManifest {
    /// Validate and freeze into a module descriptor.
    pub fn into_module(self) -> Result<Arc<ModuleDescriptor>, LoadError> {
        self.validate()?;

        let mut builder = ModuleBuilder::new(self.name);
        if let Some(version) = self.version {
            builder = builder.version(version);
        }
        for reference in self.references {
            builder = builder.with_reference(match reference {
                ReferenceManifest::Name(name) => ModuleReference::new(name),
                ReferenceManifest::Full { name, version } => ModuleReference { name, version },
            });
        }
        for ty in self.types {
            builder = builder.with_type(ty.into_builder());
        }
        Ok(builder.build())
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.name.trim().is_empty() {
            return Err(LoadError::InvalidManifest("module name is empty".to_string()));
        }
        let mut seen = FxHashSet::default();
        for (i, ty) in self.types.iter().enumerate() {
            if ty.qualified_name.trim().is_empty() {
                return Err(LoadError::InvalidManifest(format!(
                    "types[{i}] has an empty qualified_name"
                )));
            }
            if !seen.insert(ty.qualified_name.as_str()) {
                return Err(LoadError::InvalidManifest(format!(
                    "type {} is declared more than once",
                    ty.qualified_name
                )));
            }
        }
        for reference in &self.references {
            let name = match reference {
                ReferenceManifest::Name(name) | ReferenceManifest::Full { name, .. } => name,
            };
            if name.trim().is_empty() {
                return Err(LoadError::InvalidManifest(format!(
                    "module {} has a reference with an empty name",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

impl TypeManifest {
    fn into_builder(self) -> TypeBuilder {
        let mut builder = TypeBuilder::new(self.qualified_name)
            .kind(self.kind)
            .public(self.is_public);
        if let Some(namespace) = self.namespace {
            builder = builder.namespace(namespace);
        }
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        for iface in self.interfaces {
            builder = builder.implements(iface);
        }
        for method in self.methods {
            builder = match method {
                MethodManifest::Name(name) => builder.method(name),
                MethodManifest::Full {
                    name,
                    synthesized: true,
                } => builder.synthesized_method(name),
                MethodManifest::Full { name, .. } => builder.method(name),
            };
        }
        builder
    }
}
