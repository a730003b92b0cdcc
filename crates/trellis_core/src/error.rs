//! Trellis error types

use thiserror::Error;

/// Errors raised when a host hands Trellis a value it cannot work with.
///
/// Every variant is a caller contract violation. Nothing in Trellis retries
/// or recovers from these; they are returned as soon as they are detected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrellisError {
    /// A raw value does not name any variant of a closed enumeration
    #[error("Unsupported {kind} value: {value}")]
    UnsupportedValue {
        /// Name of the enumeration being converted into
        kind: &'static str,
        /// The rejected raw value, rendered for display
        value: String,
    },

    /// Column count for a multi-column layout must be strictly positive
    #[error("Invalid column count: {0} (must be greater than zero)")]
    InvalidColumnCount(i64),

    /// Geometry parameters outside their documented domain
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl TrellisError {
    pub fn unsupported(kind: &'static str, value: impl ToString) -> Self {
        Self::UnsupportedValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// Result type for Trellis operations
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = TrellisError::unsupported("ArrowPlacement", 42);
        assert_eq!(err.to_string(), "Unsupported ArrowPlacement value: 42");
    }

    #[test]
    fn test_column_count_message() {
        let err = TrellisError::InvalidColumnCount(0);
        assert!(err.to_string().contains("greater than zero"));
    }
}
