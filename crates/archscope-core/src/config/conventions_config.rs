//! Naming conventions of the compiled metadata being analyzed.

use serde::{Deserialize, Serialize};

/// Name the compiler gives the synthesized clone method of record types.
pub const DEFAULT_RECORD_CLONE_METHOD: &str = "<Clone>$";

/// Conventions used by structural custom rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConventionsConfig {
    /// Synthesized clone-method name marking record-like types. Default: `<Clone>$`.
    pub record_clone_method: Option<String>,
}

impl ConventionsConfig {
    /// Returns the effective record clone-method name.
    pub fn effective_record_clone_method(&self) -> &str {
        self.record_clone_method
            .as_deref()
            .unwrap_or(DEFAULT_RECORD_CLONE_METHOD)
    }
}
