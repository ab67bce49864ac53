//! Till session manager.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            open()                                                       │
//! │   ┌────────┐ ────────────────────► ┌────────┐                          │
//! │   │ CLOSED │                       │  OPEN  │ ◄── register_sale()       │
//! │   └────────┘ ◄──────────────────── └────────┘                          │
//! │     ▲  │        close() → SessionReport                                 │
//! │     │  │                                                                │
//! │     └──┘ register_sale() → TillClosed                                   │
//! │                                                                         │
//! │   State is read from the ledger on every call: the open session row    │
//! │   is the only source of truth, nothing is cached here.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{info, warn};

use till_core::validation::validate_listing_limit;
use till_core::{
    CoreError, NewSale, RegisterStatus, ReportPeriod, Sale, SessionReport, SessionStatus,
    TillSession,
};
use till_db::{Database, DbError};

use crate::error::{ApiResult, TillError};
use crate::services::report_service::ReportService;

/// Till session manager over the Ledger Store.
#[derive(Debug, Clone)]
pub struct TillService {
    db: Database,
    reports: ReportService,
}

impl TillService {
    pub fn new(db: Database) -> Self {
        let reports = ReportService::new(db.clone());
        TillService { db, reports }
    }

    /// Opens the till.
    ///
    /// Fails with a conflict when a session is already open.
    pub async fn open(&self) -> ApiResult<TillSession> {
        let now = Utc::now();

        match self.db.sessions().open_session(now).await {
            Ok(id) => Ok(TillSession {
                id,
                opened_at: now,
                closed_at: None,
                status: SessionStatus::Open,
            }),
            Err(DbError::Conflict(msg)) => {
                let current = self.db.sessions().current_open_session().await?;
                Err(match current {
                    Some(s) => CoreError::SessionAlreadyOpen { session_id: s.id }.into(),
                    None => TillError::Conflict(msg),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Closes the open session and returns its report.
    pub async fn close(&self) -> ApiResult<SessionReport> {
        let Some(open) = self.db.sessions().current_open_session().await? else {
            warn!("Close rejected: till is not open");
            return Err(CoreError::NoOpenSession.into());
        };

        let now = Utc::now();
        match self.db.sessions().close_session(open.id, now).await {
            Ok(()) => {}
            // Another caller closed it between the read and the update.
            Err(DbError::Conflict(_)) | Err(DbError::NotFound { .. }) => {
                return Err(CoreError::NoOpenSession.into());
            }
            Err(e) => return Err(e.into()),
        }

        let session = TillSession {
            closed_at: Some(now),
            status: SessionStatus::Closed,
            ..open
        };
        let report = self
            .reports
            .build_report(&ReportPeriod::of_session(&session, now))
            .await?;

        info!(
            session_id = session.id,
            sales = report.sale_count(),
            grand_total = %report.grand_total,
            "Till closed"
        );

        Ok(SessionReport { session, report })
    }

    /// Records a sale in the open session.
    ///
    /// Nothing is written when the till is closed or the amounts are invalid.
    pub async fn register_sale(&self, sale: NewSale) -> ApiResult<Sale> {
        if self.db.sessions().current_open_session().await?.is_none() {
            warn!(kind = %sale.kind, "Sale rejected: till is closed");
            return Err(CoreError::TillClosed.into());
        }

        let now = Utc::now();
        let id = self.db.sales().record_sale(&sale, now).await.map_err(|e| {
            if let DbError::Validation(ref v) = e {
                warn!(kind = %sale.kind, reason = %v, "Sale rejected");
            }
            TillError::from(e)
        })?;

        info!(
            sale_id = id,
            kind = %sale.kind,
            amount_cents = (sale.product_amount + sale.delivery_fee).cents(),
            "Sale recorded"
        );

        Ok(Sale {
            id,
            kind: sale.kind,
            product_amount: sale.product_amount,
            delivery_fee: sale.delivery_fee,
            created_at: now,
        })
    }

    pub async fn status(&self) -> ApiResult<RegisterStatus> {
        let open = self.db.sessions().current_open_session().await?;
        Ok(RegisterStatus::from_open_session(open.as_ref()))
    }

    /// Report of any session. An open session is reported up to now.
    pub async fn session_report(&self, id: i64) -> ApiResult<SessionReport> {
        let session = self
            .db
            .sessions()
            .get_by_id(id)
            .await?
            .ok_or(CoreError::SessionNotFound(id))?;

        self.report_of(session).await
    }

    /// Report of the most recently closed session.
    pub async fn last_closed_report(&self) -> ApiResult<SessionReport> {
        let session = self
            .db
            .sessions()
            .last_closed()
            .await?
            .ok_or_else(|| TillError::NotFound("no till session has been closed yet".into()))?;

        self.report_of(session).await
    }

    /// Sessions newest first.
    pub async fn history(&self, limit: i64) -> ApiResult<Vec<TillSession>> {
        let limit = validate_listing_limit(limit)?;
        Ok(self.db.sessions().recent(limit).await?)
    }

    /// Sales newest first.
    pub async fn recent_sales(&self, limit: i64) -> ApiResult<Vec<Sale>> {
        let limit = validate_listing_limit(limit)?;
        Ok(self.db.sales().recent(limit).await?)
    }

    async fn report_of(&self, session: TillSession) -> ApiResult<SessionReport> {
        let period = ReportPeriod::of_session(&session, Utc::now());
        let report = self.reports.build_report(&period).await?;
        Ok(SessionReport { session, report })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
