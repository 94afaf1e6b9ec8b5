//! # Error Types
//!
//! Structured error types for level_core. These errors carry enough
//! context to understand and fix issues programmatically, and they
//! serialize cleanly so a host application can surface them as-is.
//!
//! ## Example
//!
//! ```rust
//! use level_core::errors::{LevelError, LevelResult};
//!
//! fn validate_staff(reading_m: f64) -> LevelResult<()> {
//!     if reading_m < 0.0 {
//!         return Err(LevelError::InvalidInput {
//!             field: "backsight_m".to_string(),
//!             value: reading_m.to_string(),
//!             reason: "Staff readings must be non-negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for level_core operations
pub type LevelResult<T> = Result<T, LevelError>;

/// Structured error type for leveling operations.
///
/// Each variant provides specific context about what went wrong. Expected
/// domain conditions (missing sights, zero-length traverses, misclosure
/// beyond tolerance) are never errors; they are represented in the result
/// types instead.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LevelError {
    /// An input value is invalid (negative distance, non-finite number, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LevelError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LevelError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        LevelError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LevelError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        LevelError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LevelError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LevelError::InvalidInput { .. } => "INVALID_INPUT",
            LevelError::MissingField { .. } => "MISSING_FIELD",
            LevelError::FileError { .. } => "FILE_ERROR",
            LevelError::FileLocked { .. } => "FILE_LOCKED",
            LevelError::SerializationError { .. } => "SERIALIZATION_ERROR",
            LevelError::VersionMismatch { .. } => "VERSION_MISMATCH",
            LevelError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = LevelError::invalid_input(
            "interval_distance_m",
            "-5.0",
            "Distances must be non-negative",
        );
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: LevelError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LevelError::missing_field("station").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            LevelError::file_locked("a.lvl", "someone", "now").error_code(),
            "FILE_LOCKED"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(LevelError::file_locked("a.lvl", "someone", "now").is_recoverable());
        assert!(!LevelError::missing_field("station").is_recoverable());
    }
}
