//! Error handling for archscope.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod composition_error;
pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod evaluation_error;
pub mod load_error;

pub use composition_error::RuleCompositionError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::ArchscopeErrorCode;
pub use evaluation_error::RuleEvaluationError;
pub use load_error::LoadError;
