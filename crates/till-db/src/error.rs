//! # Ledger Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► TillError (till-api) ──► { "code", "message" }
//! ```
//!
//! Variants split into two groups. `NotFound`, `Conflict`, `Validation` and
//! the constraint violations describe the caller's request and reach the
//! client as-is. The rest are failures of the store itself; till-api logs
//! them and answers with a generic storage error.

use thiserror::Error;
use till_core::ValidationError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The row exists but its state forbids the operation, e.g. a second
    /// open session or a second close.
    #[error("{0}")]
    Conflict(String),

    /// Rejected by till-core before any SQL ran.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A unique index refused the write. The single-open-session index is
    /// the only one in the schema.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// An amount CHECK refused the write, which means validation was skipped.
    #[error("check constraint violated: {0}")]
    CheckViolation(String),

    #[error("cannot open ledger: {0}")]
    ConnectionFailed(String),

    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// No connection became free in time.
    #[error("connection pool exhausted")]
    PoolExhausted,

    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                DbError::CheckViolation(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            other => DbError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
