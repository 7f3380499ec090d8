//! TOML module manifests.

use std::sync::Arc;

use archscope_core::errors::LoadError;

use super::manifest::ModuleManifest;
use super::MetadataProvider;
use crate::model::ModuleDescriptor;

/// Reads a [`ModuleManifest`] encoded as TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlManifestProvider;

impl MetadataProvider for TomlManifestProvider {
    fn format_name(&self) -> &'static str {
        "toml"
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<ModuleDescriptor>, LoadError> {
        let text = std::str::from_utf8(bytes).map_err(|e| LoadError::Parse {
            format: self.format_name(),
            message: e.to_string(),
        })?;
        let manifest: ModuleManifest = toml::from_str(text).map_err(|e| LoadError::Parse {
            format: self.format_name(),
            message: e.to_string(),
        })?;
        manifest.into_module()
    }
}
