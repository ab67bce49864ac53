//! # Till API
//!
//! HTTP server for the till register of a small food stand.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till API Layers                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  routes (axum)                                                    │  │
//! │  │  /till/*   /sales/*   /report   /health                           │  │
//! │  └───────────────┬──────────────────────────────┬───────────────────┘  │
//! │                  │                              │                       │
//! │  ┌───────────────▼──────────────┐  ┌────────────▼────────────────────┐ │
//! │  │  TillService                 │  │  ReportService                  │ │
//! │  │  • open / close              │─►│  • build_report(period)         │ │
//! │  │  • register_sale (gated)     │  │  • report_for_dates(from, to)   │ │
//! │  │  • status / history          │  │                                 │ │
//! │  └───────────────┬──────────────┘  └────────────┬────────────────────┘ │
//! │                  │                              │                       │
//! │  ┌───────────────▼──────────────────────────────▼───────────────────┐  │
//! │  │  till-db (Ledger Store, SQLite)                                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables, see [`config`]:
//! - `TILL_BIND_ADDR` / `TILL_HTTP_PORT` - listen address (default `0.0.0.0:8000`)
//! - `TILL_DATABASE_PATH` - SQLite file (default `till.db`)
//! - `TILL_DB_MAX_CONNECTIONS` - pool size (default 5)
//! - `TILL_UTC_OFFSET_MINUTES` - local offset for report dates (default 0)
//! - `TILL_HISTORY_LIMIT` - default listing size (default 20)

use std::sync::Arc;

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiResult, TillError};
pub use routes::router;

use services::{ReportService, TillService};
use till_db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    pub fn till(&self) -> TillService {
        TillService::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.db.clone())
    }
}
