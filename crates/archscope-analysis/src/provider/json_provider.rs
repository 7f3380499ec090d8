//! JSON module manifests.

use std::sync::Arc;

use archscope_core::errors::LoadError;

use super::manifest::ModuleManifest;
use super::MetadataProvider;
use crate::model::ModuleDescriptor;

/// Reads a [`ModuleManifest`] encoded as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestProvider;

impl MetadataProvider for JsonManifestProvider {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<ModuleDescriptor>, LoadError> {
        let manifest: ModuleManifest =
            serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
                format: self.format_name(),
                message: e.to_string(),
            })?;
        manifest.into_module()
    }
}
