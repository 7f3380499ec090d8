//! Top-level error for callers that drive the whole load → rule → result flow.

use super::error_code::ArchscopeErrorCode;
use super::{ConfigError, LoadError, RuleCompositionError};

/// Unrecoverable failures of a query, aggregated via `From` conversions.
///
/// `RuleEvaluationError` has no variant here: it is recovered per type and
/// surfaces inside the rule result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Composition error: {0}")]
    Composition(#[from] RuleCompositionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ArchscopeErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Load(e) => e.error_code(),
            Self::Composition(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
