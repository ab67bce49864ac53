//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Till lifecycle rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  └── DbError          - Ledger Store failures                          │
//! │                                                                         │
//! │  till-api errors (in app)                                              │
//! │  └── TillError        - What HTTP clients see (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TillError → JSON response         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Till lifecycle rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale was attempted while no till session is open.
    ///
    /// ## User Workflow
    /// ```text
    /// Register sale (R$ 10.00)
    ///      │
    ///      ▼
    /// current_open_session() → None
    ///      │
    ///      ▼
    /// TillClosed → UI shows "till is closed", nothing is recorded
    /// ```
    #[error("till is closed")]
    TillClosed,

    /// `open` was called while another session is still open.
    #[error("till is already open (session {session_id})")]
    SessionAlreadyOpen { session_id: i64 },

    /// `close` was called with no open session.
    #[error("no open till session to close")]
    NoOpenSession,

    /// The referenced session does not exist.
    #[error("till session not found: {0}")]
    SessionNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Start of a report period lies after its end.
    #[error("start date {from} cannot be after end date {to}")]
    InvertedRange { from: String, to: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::TillClosed.to_string(), "till is closed");
        assert_eq!(
            CoreError::SessionAlreadyOpen { session_id: 7 }.to_string(),
            "till is already open (session 7)"
        );
        assert_eq!(CoreError::SessionNotFound(3).to_string(), "till session not found: 3");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be greater than zero");

        let err = ValidationError::InvertedRange {
            from: "2024-05-02".to_string(),
            to: "2024-05-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "start date 2024-05-02 cannot be after end date 2024-05-01"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustNotBeNegative {
            field: "delivery_fee".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "delivery_fee must not be negative");
    }
}
