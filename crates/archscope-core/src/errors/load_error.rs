//! Metadata loading errors.

use super::error_code::{self, ArchscopeErrorCode};

/// A metadata provider could not produce a module descriptor.
///
/// The engine never recovers from these: without a module there is
/// nothing to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read module metadata from {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed {format} module manifest: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Invalid module manifest: {0}")]
    InvalidManifest(String),

    #[error("Unsupported module format: {0}")]
    UnsupportedFormat(String),
}

impl ArchscopeErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => error_code::UNSUPPORTED_FORMAT,
            _ => error_code::LOAD_ERROR,
        }
    }
}
