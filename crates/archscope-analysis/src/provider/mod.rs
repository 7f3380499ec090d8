//! Metadata providers. They turn a serialized module description into an
//! immutable [`ModuleDescriptor`].
//!
//! Providers are independent and swappable; the rule engine only sees the
//! model they produce.

pub mod json_provider;
pub mod manifest;
pub mod toml_provider;

use std::path::Path;
use std::sync::Arc;

use archscope_core::errors::LoadError;

pub use json_provider::JsonManifestProvider;
pub use manifest::{MethodManifest, ModuleManifest, ReferenceManifest, TypeManifest};
pub use toml_provider::TomlManifestProvider;

use crate::model::ModuleDescriptor;

/// Produces a module descriptor from bytes or a file.
pub trait MetadataProvider: Send + Sync {
    /// Short format name used in logs and errors.
    fn format_name(&self) -> &'static str;

    fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<ModuleDescriptor>, LoadError>;

    fn load_path(&self, path: &Path) -> Result<Arc<ModuleDescriptor>, LoadError> {
        let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let module = self.load_bytes(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            format = self.format_name(),
            module = %module.name(),
            types = module.types().len(),
            "module metadata loaded"
        );
        Ok(module)
    }
}

/// Pick a provider from the file extension.
pub fn provider_for_path(path: &Path) -> Result<Box<dyn MetadataProvider>, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonManifestProvider)),
        Some("toml") => Ok(Box::new(TomlManifestProvider)),
        Some(other) => Err(LoadError::UnsupportedFormat(other.to_string())),
        None => Err(LoadError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load a module with the provider matching `path`'s extension.
pub fn load_module(path: &Path) -> Result<Arc<ModuleDescriptor>, LoadError> {
    provider_for_path(path)?.load_path(path)
}
