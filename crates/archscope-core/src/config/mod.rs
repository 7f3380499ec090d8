//! Configuration system for archscope.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod archscope_config;
pub mod conventions_config;
pub mod engine_config;
pub mod rules_config;

pub use archscope_config::{ArchscopeConfig, CliOverrides};
pub use conventions_config::ConventionsConfig;
pub use engine_config::{EmptySelectionPolicy, EngineConfig};
pub use rules_config::{AssertionSpec, PredicateSpec, RuleDefinition};
