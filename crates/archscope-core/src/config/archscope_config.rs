//! Top-level archscope configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ConventionsConfig, EmptySelectionPolicy, EngineConfig, RuleDefinition};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "archscope.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ARCHSCOPE_*`)
/// 3. Project config (`archscope.toml` in project root)
/// 4. User config (`~/.archscope/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArchscopeConfig {
    pub engine: EngineConfig,
    pub conventions: ConventionsConfig,
    pub rules: Vec<RuleDefinition>,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub empty_selection: Option<EmptySelectionPolicy>,
    pub parallel: Option<bool>,
    pub parallel_threshold: Option<usize>,
}

impl ArchscopeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(
            empty_selection = %config.engine.effective_empty_selection(),
            rules = config.rules.len(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ArchscopeConfig) -> Result<(), ConfigError> {
        if config.engine.parallel_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "engine.parallel_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(name) = &config.conventions.record_clone_method {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "conventions.record_clone_method".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for (i, rule) in config.rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("rules[{i}].id"),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.archscope/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ArchscopeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ArchscopeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`. Scalar settings override only when set;
    /// rules from a later layer replace rules with the same id and append
    /// the rest.
    fn merge(base: &mut ArchscopeConfig, other: ArchscopeConfig) {
        if other.engine.empty_selection.is_some() {
            base.engine.empty_selection = other.engine.empty_selection;
        }
        if other.engine.parallel.is_some() {
            base.engine.parallel = other.engine.parallel;
        }
        if other.engine.parallel_threshold.is_some() {
            base.engine.parallel_threshold = other.engine.parallel_threshold;
        }
        if other.conventions.record_clone_method.is_some() {
            base.conventions.record_clone_method = other.conventions.record_clone_method;
        }
        for rule in other.rules {
            match base.rules.iter_mut().find(|r| r.id == rule.id) {
                Some(existing) => *existing = rule,
                None => base.rules.push(rule),
            }
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ARCHSCOPE_EMPTY_SELECTION`, `ARCHSCOPE_PARALLEL_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut ArchscopeConfig) {
        if let Ok(val) = std::env::var("ARCHSCOPE_EMPTY_SELECTION") {
            match EmptySelectionPolicy::parse(&val) {
                Some(policy) => config.engine.empty_selection = Some(policy),
                None => tracing::warn!(value = %val, "ignoring invalid ARCHSCOPE_EMPTY_SELECTION"),
            }
        }
        if let Ok(val) = std::env::var("ARCHSCOPE_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.engine.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARCHSCOPE_PARALLEL_THRESHOLD") {
            if let Ok(v) = val.parse::<usize>() {
                config.engine.parallel_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARCHSCOPE_RECORD_CLONE_METHOD") {
            config.conventions.record_clone_method = Some(val);
        }
    }

    fn apply_cli_overrides(config: &mut ArchscopeConfig, cli: &CliOverrides) {
        if cli.empty_selection.is_some() {
            config.engine.empty_selection = cli.empty_selection;
        }
        if cli.parallel.is_some() {
            config.engine.parallel = cli.parallel;
        }
        if cli.parallel_threshold.is_some() {
            config.engine.parallel_threshold = cli.parallel_threshold;
        }
    }
}

/// Returns `~/.archscope`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".archscope"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
