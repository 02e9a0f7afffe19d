//! Error types for the criteria compiler.

use thiserror::Error;

/// The main error type for compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Operator the dialect compiler does not implement (group-level `not`,
    /// unknown comparator keys).
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Value type not allowed in this position (e.g. a regex pattern in `like`).
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Criteria input with the wrong shape.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Create an unknown comparator error.
    pub fn unknown_comparator(key: impl AsRef<str>) -> Self {
        Self::UnsupportedOperator(format!("Unknown comparator: {}", key.as_ref()))
    }

    /// Create an invalid criteria error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidCriteria(message.into())
    }
}

/// Result type alias for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompileError::unknown_comparator("between");
        assert_eq!(
            err.to_string(),
            "Unsupported operator: Unknown comparator: between"
        );
    }

    #[test]
    fn test_invalid_display() {
        let err = CompileError::invalid("`or` must be a list");
        assert_eq!(err.to_string(), "Invalid criteria: `or` must be a list");
    }
}
