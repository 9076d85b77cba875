//! # Error Types
//!
//! Structured error types for calc_core. Every error is local to a single
//! `calculate` call: the caller keeps whatever result it was showing and asks
//! the user to correct the input. Nothing here is fatal to the process.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_price(price: f64) -> CalcResult<()> {
//!     if price <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "original_price".to_string(),
//!             value: price.to_string(),
//!             reason: "Price must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong so the
/// presentation layer can point at the offending field.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-numeric, non-positive, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A sale exceeds the shares currently held
    #[error("Insufficient shares: tried to sell {requested} but only {held} held")]
    InsufficientShares { requested: f64, held: f64 },

    /// A zero or non-finite denominator reached a formula
    #[error("Division guard tripped in {operation}")]
    DivisionGuard { operation: String },

    /// File I/O error (settings files)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InsufficientShares error
    pub fn insufficient_shares(requested: f64, held: f64) -> Self {
        CalcError::InsufficientShares { requested, held }
    }

    /// Create a DivisionGuard error
    pub fn division_guard(operation: impl Into<String>) -> Self {
        CalcError::DivisionGuard {
            operation: operation.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry).
    ///
    /// Calculations are pure, so only file operations are worth retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InsufficientShares { .. } => "INSUFFICIENT_SHARES",
            CalcError::DivisionGuard { .. } => "DIVISION_GUARD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Short message suitable for showing to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { reason, .. } if reason.contains("positive") => {
                "양수를 입력해주세요."
            }
            CalcError::InvalidInput { .. } => "올바른 숫자를 입력해주세요.",
            CalcError::MissingField { .. } => "필수 항목입니다.",
            CalcError::InsufficientShares { .. } => "보유 주식 수보다 많이 매도할 수 없습니다.",
            _ => "계산 중 오류가 발생했습니다.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("principal", "-5", "Principal must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"InvalidInput\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::insufficient_shares(10.0, 5.0).error_code(), "INSUFFICIENT_SHARES");
        assert_eq!(CalcError::division_guard("bmi").error_code(), "DIVISION_GUARD");
    }

    #[test]
    fn test_calculation_errors_not_recoverable() {
        assert!(!CalcError::invalid_input("a", "b", "c").is_recoverable());
        assert!(!CalcError::insufficient_shares(1.0, 0.0).is_recoverable());
        assert!(CalcError::file_error("read", "x.json", "denied").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let positive = CalcError::invalid_input("weight_kg", "0", "Weight must be positive");
        assert_eq!(positive.user_message(), "양수를 입력해주세요.");
        let garbage = CalcError::invalid_input("weight_kg", "abc", "Not a number");
        assert_eq!(garbage.user_message(), "올바른 숫자를 입력해주세요.");
        assert_eq!(CalcError::missing_field("x").user_message(), "필수 항목입니다.");
    }

    #[test]
    fn test_display() {
        let err = CalcError::insufficient_shares(20.0, 10.0);
        assert_eq!(err.to_string(), "Insufficient shares: tried to sell 20 but only 10 held");
    }
}
