//! Rule engine configuration.

use serde::{Deserialize, Serialize};

/// What a rule reports when its selector matches no types at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Zero candidates pass (vacuous truth).
    #[default]
    Vacuous,
    /// Zero candidates fail the rule, with no violating types listed.
    Strict,
}

impl EmptySelectionPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vacuous => "vacuous",
            Self::Strict => "strict",
        }
    }

    /// Parse from the config/env spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vacuous" => Some(Self::Vacuous),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmptySelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Empty-selection handling. Default: vacuous.
    pub empty_selection: Option<EmptySelectionPolicy>,
    /// Evaluate candidates on the rayon pool. Default: true.
    pub parallel: Option<bool>,
    /// Minimum candidate count before going parallel. Default: 256.
    pub parallel_threshold: Option<usize>,
}

impl EngineConfig {
    /// Returns the effective empty-selection policy, defaulting to vacuous.
    pub fn effective_empty_selection(&self) -> EmptySelectionPolicy {
        self.empty_selection.unwrap_or_default()
    }

    /// Returns whether parallel evaluation is enabled, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    /// Returns the effective parallel threshold, defaulting to 256.
    pub fn effective_parallel_threshold(&self) -> usize {
        self.parallel_threshold.unwrap_or(256)
    }

    /// An engine config with strict empty-selection handling.
    pub fn strict() -> Self {
        Self {
            empty_selection: Some(EmptySelectionPolicy::Strict),
            ..Default::default()
        }
    }

    /// An engine config that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: Some(false),
            ..Default::default()
        }
    }
}
