//! # Ledger Connection
//!
//! Opens the SQLite file behind the Ledger Store and hands out repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::db_config()                                                 │
//! │       │  path + TILL_DB_MAX_CONNECTIONS                                 │
//! │       ▼                                                                 │
//! │  Database::new ──► SqlitePool (WAL) ──► migrations ──► ready            │
//! │                         │                                               │
//! │            ┌────────────┴────────────┐                                  │
//! │            ▼                         ▼                                  │
//! │      sales() → SaleRepository   sessions() → SessionRepository          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL lets report reads run while a sale is being written. Migrations are
//! applied on every start.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::sale::SaleRepository;
use crate::repository::session::SessionRepository;

/// How long a request waits for a free connection before failing with
/// [`DbError::PoolExhausted`].
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const IN_MEMORY: &str = ":memory:";

/// Where the ledger lives and how many connections may reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl DbConfig {
    /// File-backed ledger with five connections. The file is created on
    /// first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Private in-memory ledger for tests. Every call is a fresh database,
    /// reached through a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
        };

        Ok(options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

/// Handle on the ledger. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Opening ledger"
        );

        // One connection stays open so an in-memory ledger is never dropped.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Applies pending migrations. Already applied ones are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections to return, then closes the pool.
    /// Every later call fails.
    pub async fn close(&self) {
        info!("Closing ledger");
        self.pool.close().await;
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        a.sessions().open_session(chrono::Utc::now()).await.unwrap();

        assert!(a.sessions().current_open_session().await.unwrap().is_some());
        assert!(b.sessions().current_open_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_ledger_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("till.db")).max_connections(2);
        assert_eq!(config.max_connections, 2);

        let db = Database::new(config.clone()).await.unwrap();
        let id = db.sessions().open_session(chrono::Utc::now()).await.unwrap();
        db.close().await;

        let reopened = Database::new(config).await.unwrap();
        let current = reopened.sessions().current_open_session().await.unwrap();
        assert_eq!(current.map(|s| s.id), Some(id));
    }
}
