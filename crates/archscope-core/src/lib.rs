//! Core types, errors, config, and tracing for the archscope rule engine.
//!
//! Everything here is shared infrastructure: the analysis crate owns the
//! metadata model and the rule pipeline.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::ArchscopeConfig;
pub use errors::{
    ArchscopeErrorCode, ConfigError, EngineError, LoadError, RuleCompositionError,
    RuleEvaluationError,
};
