//! # Till Session Repository
//!
//! Lifecycle of till sessions: opened once, closed once, never reopened.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   open_session(t0)                 close_session(id, t1)                │
//! │        │                                  │                             │
//! │        ▼                                  ▼                             │
//! │   ┌─────────┐                       ┌──────────┐                        │
//! │   │  open   │──────────────────────►│  closed  │  (terminal)            │
//! │   │ t0, -   │                       │  t0, t1  │                        │
//! │   └─────────┘                       └──────────┘                        │
//! │                                                                         │
//! │   idx_till_sessions_single_open: at most one row with status='open'     │
//! │   → a second open_session fails with DbError::Conflict                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use till_core::TillSession;

/// Message carried by the conflict raised when a session is already open.
pub const ALREADY_OPEN: &str = "till is already open";

/// Repository for till session database operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Opens a new session at `at` and returns its id.
    ///
    /// Fails with [`DbError::Conflict`] when another session is open. The
    /// check is the partial unique index, so concurrent callers cannot both
    /// succeed.
    pub async fn open_session(&self, at: DateTime<Utc>) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO till_sessions (opened_at, status)
            VALUES (?1, 'open')
            "#,
        )
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(DbError::from);

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                info!(session_id = id, opened_at = %at, "Till session opened");
                Ok(id)
            }
            Err(DbError::UniqueViolation(_)) => {
                warn!("Rejected open: a till session is already open");
                Err(DbError::Conflict(ALREADY_OPEN.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Marks session `id` closed at `at`.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] when no session has this id
    /// - [`DbError::Conflict`] when the session is already closed
    pub async fn close_session(&self, id: i64, at: DateTime<Utc>) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE till_sessions
            SET status = 'closed', closed_at = ?2
            WHERE id = ?1 AND status = 'open'
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM till_sessions WHERE id = ?1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;

            tx.rollback().await?;

            return match exists {
                Some(_) => Err(DbError::Conflict(format!(
                    "till session {} is already closed",
                    id
                ))),
                None => Err(DbError::not_found("TillSession", id)),
            };
        }

        tx.commit().await?;

        info!(session_id = id, closed_at = %at, "Till session closed");
        Ok(())
    }

    /// The session currently open, if any.
    pub async fn current_open_session(&self) -> DbResult<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, opened_at, closed_at, status
            FROM till_sessions
            WHERE status = 'open'
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, opened_at, closed_at, status
            FROM till_sessions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// The most recently closed session.
    pub async fn last_closed(&self) -> DbResult<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, opened_at, closed_at, status
            FROM till_sessions
            WHERE status = 'closed'
            ORDER BY closed_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Sessions newest first, open one included.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<TillSession>> {
        debug!(limit, "Listing till sessions");

        let sessions = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, opened_at, closed_at, status
            FROM till_sessions
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
