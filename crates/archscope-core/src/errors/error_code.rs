//! ArchscopeErrorCode trait for reporter-facing error codes.

/// Every error enum implements this to give reporters a stable,
/// machine-readable code alongside the human message.
pub trait ArchscopeErrorCode {
    /// Returns the error code string (e.g., "LOAD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const LOAD_ERROR: &str = "LOAD_ERROR";
pub const UNSUPPORTED_FORMAT: &str = "UNSUPPORTED_FORMAT";
pub const RULE_COMPOSITION_ERROR: &str = "RULE_COMPOSITION_ERROR";
pub const RULE_EVALUATION_ERROR: &str = "RULE_EVALUATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
