//! Error types for the Till API.
//!
//! ```text
//! ┌──────────────────────────┬────────┬────────────────────┐
//! │ TillError                │ Status │ code               │
//! ├──────────────────────────┼────────┼────────────────────┤
//! │ Validation               │  400   │ VALIDATION_ERROR   │
//! │ Conflict                 │  400   │ CONFLICT           │
//! │ NoOpenSession            │  400   │ NOT_FOUND          │
//! │ TillClosed               │  400   │ TILL_CLOSED        │
//! │ NotFound                 │  404   │ NOT_FOUND          │
//! │ Storage                  │  500   │ STORAGE_ERROR      │
//! └──────────────────────────┴────────┴────────────────────┘
//! ```
//!
//! Storage details are logged, never returned to the client.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use till_core::{CoreError, ValidationError};
use till_db::DbError;

/// Message returned in place of storage failure details.
const STORAGE_MESSAGE: &str = "the ledger could not be read or written";

/// Till API errors.
#[derive(Debug, thiserror::Error)]
pub enum TillError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(String),

    /// Close requested while the till is closed.
    #[error("no open till session to close")]
    NoOpenSession,

    /// Sale rejected because no session is open.
    #[error("till is closed")]
    TillClosed,

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl TillError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TillError::Validation(_)
            | TillError::Conflict(_)
            | TillError::NoOpenSession
            | TillError::TillClosed => StatusCode::BAD_REQUEST,
            TillError::NotFound(_) => StatusCode::NOT_FOUND,
            TillError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TillError::Validation(_) => "VALIDATION_ERROR",
            TillError::Conflict(_) => "CONFLICT",
            TillError::NoOpenSession | TillError::NotFound(_) => "NOT_FOUND",
            TillError::TillClosed => "TILL_CLOSED",
            TillError::Storage(_) => "STORAGE_ERROR",
        }
    }

    fn body(&self) -> ErrorBody {
        let message = match self {
            TillError::Storage(_) => STORAGE_MESSAGE.to_string(),
            other => other.to_string(),
        };

        ErrorBody {
            code: self.code().to_string(),
            message,
        }
    }
}

impl IntoResponse for TillError {
    fn into_response(self) -> Response {
        if let TillError::Storage(ref detail) = self {
            error!(error = %detail, "Ledger storage failure");
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<CoreError> for TillError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TillClosed => TillError::TillClosed,
            CoreError::NoOpenSession => TillError::NoOpenSession,
            CoreError::SessionNotFound(_) => TillError::NotFound(err.to_string()),
            CoreError::SessionAlreadyOpen { .. } => TillError::Conflict(err.to_string()),
            CoreError::Validation(e) => TillError::Validation(e),
        }
    }
}

impl From<DbError> for TillError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => TillError::Validation(e),
            DbError::Conflict(msg) => TillError::Conflict(msg),
            DbError::NotFound { .. } => TillError::NotFound(err.to_string()),
            DbError::UniqueViolation(_) | DbError::CheckViolation(_) => {
                TillError::Conflict(err.to_string())
            }
            other => TillError::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for TillError {
    fn from(rejection: JsonRejection) -> Self {
        invalid_request("body", rejection.body_text())
    }
}

impl From<QueryRejection> for TillError {
    fn from(rejection: QueryRejection) -> Self {
        invalid_request("query", rejection.body_text())
    }
}

impl From<PathRejection> for TillError {
    fn from(rejection: PathRejection) -> Self {
        invalid_request("path", rejection.body_text())
    }
}

fn invalid_request(field: &str, reason: String) -> TillError {
    TillError::Validation(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason,
    })
}

/// Result type for till API operations.
pub type ApiResult<T> = Result<T, TillError>;
